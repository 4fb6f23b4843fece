use crate::models::{Food, OrderItem};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub food_id: String,
    pub food: Food,
    pub qty: u32,
    /// Price of the food when it was first added.
    pub price: f64,
}

/// Cart contents as the checkout panel shows them.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total_amount: f64,
    pub total_items: u32,
}

/// The customer's order draft. Lives only in memory until it is submitted.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add(&mut self, food: &Food, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.food_id == food.id) {
            line.qty = line.qty.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            food_id: food.id.clone(),
            food: food.clone(),
            qty: quantity,
            price: food.price,
        });
    }

    pub fn add_one(&mut self, food: &Food) {
        self.add(food, 1);
    }

    pub fn remove(&mut self, food_id: &str) {
        self.lines.retain(|line| line.food_id != food_id);
    }

    /// Zero or negative quantities drop the line.
    pub fn set_quantity(&mut self, food_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(food_id);
            return;
        }

        let qty = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|line| line.food_id == food_id) {
            line.qty = qty;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_amount(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.price * line.qty as f64)
            .sum()
    }

    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.lines.clone(),
            total_amount: self.total_amount(),
            total_items: self.total_item_count(),
        }
    }

    /// Items as they are written into an order document.
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|line| OrderItem {
                food_id: line.food_id.clone(),
                qty: line.qty,
                price: line.price,
                food: None,
            })
            .collect()
    }
}
