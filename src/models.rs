use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Main,
    Drink,
    Salad,
    Bread,
}

impl FoodCategory {
    /// Every category, in menu order.
    pub const ALL: [FoodCategory; 4] = [
        FoodCategory::Main,
        FoodCategory::Drink,
        FoodCategory::Salad,
        FoodCategory::Bread,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Main => "main",
            FoodCategory::Drink => "drink",
            FoodCategory::Salad => "salad",
            FoodCategory::Bread => "bread",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FoodCategory::Main => "Main",
            FoodCategory::Drink => "Drink",
            FoodCategory::Salad => "Salad",
            FoodCategory::Bread => "Bread",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cooking,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub category: FoodCategory,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A menu item as written by the kitchen, before the store assigns an id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateFood {
    pub title: String,
    pub price: f64,
    pub category: FoodCategory,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CreateFood {
    pub fn into_food(self, id: String) -> Food {
        Food {
            id,
            title: self.title,
            price: self.price,
            category: self.category,
            is_available: self.is_available,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

impl From<Food> for CreateFood {
    fn from(food: Food) -> Self {
        CreateFood {
            title: food.title,
            price: food.price,
            category: food.category,
            is_available: food.is_available,
            description: food.description,
            image_url: food.image_url,
        }
    }
}

/// Partial menu item update. Absent fields are left untouched; an empty
/// description or image URL clears it.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FoodCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FoodPatch {
    pub fn apply(&self, food: &mut Food) {
        if let Some(title) = &self.title {
            food.title = title.clone();
        }
        if let Some(price) = self.price {
            food.price = price;
        }
        if let Some(category) = self.category {
            food.category = category;
        }
        if let Some(is_available) = self.is_available {
            food.is_available = is_available;
        }
        if let Some(description) = &self.description {
            food.description = (!description.is_empty()).then(|| description.clone());
        }
        if let Some(image_url) = &self.image_url {
            food.image_url = (!image_url.is_empty()).then(|| image_url.clone());
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub food_id: String,
    pub qty: u32,
    /// Unit price captured when the order was placed.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<Food>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.qty as f64
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

/// The order document as it is written to the store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: i64,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

impl NewOrder {
    pub fn into_order(self, id: String) -> Order {
        Order {
            id,
            user_id: self.user_id,
            items: self.items,
            status: self.status,
            created_at: self.created_at,
            total_amount: self.total_amount,
            customer_notes: self.customer_notes,
            user: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct CategoryStats {
    pub count: u32,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub total_revenue: f64,
    pub total_orders: u32,
    pub category_stats: std::collections::BTreeMap<FoodCategory, CategoryStats>,
}
