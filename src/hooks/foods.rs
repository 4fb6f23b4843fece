use super::{lock, Mirror, SharedMirror};
use crate::error::Result;
use crate::gateway::{Gateway, Listener, Subscription};
use crate::models::{CreateFood, Food, FoodCategory, FoodPatch};
use crate::notify::{Feed, Notification, Notifier};
use std::sync::{Arc, Mutex};
use tracing::error;

/// Menu mutations. Each one reports its outcome to the notifier and hands
/// failures back to the caller.
#[derive(Clone)]
pub struct FoodCommands {
    gateway: Arc<dyn Gateway>,
    notifier: Arc<dyn Notifier>,
}

impl FoodCommands {
    pub fn new(gateway: Arc<dyn Gateway>, notifier: Arc<dyn Notifier>) -> Self {
        FoodCommands { gateway, notifier }
    }

    pub fn add_food(&self, food: &CreateFood) -> Result<String> {
        match self.gateway.add_food(food) {
            Ok(id) => {
                self.notifier
                    .notify(Notification::info("Success", "Menu item added successfully."));
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "Error adding food");
                self.notifier
                    .notify(Notification::error("Error", "Failed to add menu item."));
                Err(e)
            }
        }
    }

    pub fn update_food(&self, id: &str, patch: &FoodPatch) -> Result<()> {
        match self.gateway.update_food(id, patch) {
            Ok(()) => {
                self.notifier
                    .notify(Notification::info("Success", "Menu item updated successfully."));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, food = id, "Error updating food");
                self.notifier
                    .notify(Notification::error("Error", "Failed to update menu item."));
                Err(e)
            }
        }
    }

    pub fn delete_food(&self, id: &str) -> Result<()> {
        match self.gateway.delete_food(id) {
            Ok(()) => {
                self.notifier
                    .notify(Notification::info("Success", "Menu item deleted successfully."));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, food = id, "Error deleting food");
                self.notifier
                    .notify(Notification::error("Error", "Failed to delete menu item."));
                Err(e)
            }
        }
    }
}

/// Mirror of the whole menu.
pub struct FoodsHook {
    commands: FoodCommands,
    mirror: SharedMirror<Vec<Food>>,
    _subscription: Subscription,
}

impl FoodsHook {
    pub fn open(gateway: Arc<dyn Gateway>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let mirror: SharedMirror<Vec<Food>> = Arc::new(Mutex::new(Mirror::default()));

        let listener: Listener<Food> = {
            let mirror = Arc::clone(&mirror);
            let notifier = Arc::clone(&notifier);
            Arc::new(move |pushed: Result<Vec<Food>>| match pushed {
                Ok(foods) => {
                    lock(&mirror).loaded(foods);
                    notifier.refreshed(Feed::Foods);
                }
                Err(e) => {
                    error!(error = %e, "Error fetching foods");
                    lock(&mirror).load_failed();
                    notifier.notify(Notification::error("Error", "Failed to fetch menu items."));
                }
            })
        };

        let subscription = gateway.watch_foods(listener)?;

        Ok(FoodsHook {
            commands: FoodCommands::new(gateway, notifier),
            mirror,
            _subscription: subscription,
        })
    }

    pub fn commands(&self) -> &FoodCommands {
        &self.commands
    }

    pub fn foods(&self) -> Vec<Food> {
        lock(&self.mirror).data.clone()
    }

    pub fn loading(&self) -> bool {
        lock(&self.mirror).loading
    }

    pub fn failed(&self) -> bool {
        lock(&self.mirror).failed
    }

    pub fn find(&self, id: &str) -> Option<Food> {
        lock(&self.mirror).data.iter().find(|food| food.id == id).cloned()
    }

    pub fn by_category(&self, category: FoodCategory) -> Vec<Food> {
        lock(&self.mirror)
            .data
            .iter()
            .filter(|food| food.category == category)
            .cloned()
            .collect()
    }

    pub fn available(&self) -> Vec<Food> {
        lock(&self.mirror)
            .data
            .iter()
            .filter(|food| food.is_available)
            .cloned()
            .collect()
    }
}
