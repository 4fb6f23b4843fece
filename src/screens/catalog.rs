use crate::error::{Error, Result};
use crate::hooks::foods::FoodCommands;
use crate::models::{CreateFood, Food, FoodCategory, FoodPatch};
use crate::notify::{Notification, Notifier};
use serde::{Deserialize, Serialize};

/// The menu item dialog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodForm {
    pub title: String,
    pub price: f64,
    pub category: FoodCategory,
    pub is_available: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Default for FoodForm {
    fn default() -> Self {
        FoodForm {
            title: String::new(),
            price: 0.0,
            category: FoodCategory::Main,
            is_available: true,
            description: String::new(),
            image_url: None,
        }
    }
}

impl FoodForm {
    pub fn from_food(food: &Food) -> Self {
        FoodForm {
            title: food.title.clone(),
            price: food.price,
            category: food.category,
            is_available: food.is_available,
            description: food.description.clone().unwrap_or_default(),
            image_url: food.image_url.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title is required".to_string()));
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(Error::Validation(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        Ok(())
    }

    fn into_create(self) -> CreateFood {
        let description = self.description.trim().to_string();
        CreateFood {
            title: self.title.trim().to_string(),
            price: self.price,
            category: self.category,
            is_available: self.is_available,
            description: (!description.is_empty()).then_some(description),
            image_url: self
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        }
    }

    /// Every field is sent; blank text fields clear the stored value.
    fn into_patch(self) -> FoodPatch {
        FoodPatch {
            title: Some(self.title.trim().to_string()),
            price: Some(self.price),
            category: Some(self.category),
            is_available: Some(self.is_available),
            description: Some(self.description.trim().to_string()),
            image_url: Some(
                self.image_url
                    .map(|url| url.trim().to_string())
                    .unwrap_or_default(),
            ),
        }
    }
}

/// Creates a menu item, or updates `editing` when it is set. Returns the
/// item's id. An invalid form is reported and nothing is sent.
pub fn save_food(
    commands: &FoodCommands,
    notifier: &dyn Notifier,
    editing: Option<&str>,
    form: FoodForm,
) -> Result<String> {
    if let Err(e) = form.validate() {
        notifier.notify(Notification::error(
            "Validation Error",
            "Please provide a valid title and price.",
        ));
        return Err(e);
    }

    match editing {
        Some(id) => {
            commands.update_food(id, &form.into_patch())?;
            Ok(id.to_string())
        }
        None => commands.add_food(&form.into_create()),
    }
}

pub fn toggle_availability(commands: &FoodCommands, food: &Food) -> Result<()> {
    let patch = FoodPatch {
        is_available: Some(!food.is_available),
        ..FoodPatch::default()
    };
    commands.update_food(&food.id, &patch)
}

pub fn delete_food(commands: &FoodCommands, food_id: &str) -> Result<()> {
    commands.delete_food(food_id)
}
