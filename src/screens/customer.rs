use crate::cart::{Cart, CartSummary};
use crate::error::{Error, Result};
use crate::hooks::auth::AuthSession;
use crate::hooks::lock;
use crate::hooks::orders::OrderCommands;
use crate::models::{CreateOrder, Food, FoodCategory};
use crate::notify::{Notification, Notifier};
use serde::Serialize;
use std::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MenuSection {
    pub category: FoodCategory,
    pub title: &'static str,
    pub foods: Vec<Food>,
}

/// Available foods grouped by category in menu order. Categories with
/// nothing on offer are left out.
pub fn menu_sections(foods: &[Food]) -> Vec<MenuSection> {
    FoodCategory::ALL
        .iter()
        .filter_map(|category| {
            let foods: Vec<Food> = foods
                .iter()
                .filter(|food| food.is_available && food.category == *category)
                .cloned()
                .collect();

            (!foods.is_empty()).then(|| MenuSection {
                category: *category,
                title: category.display_name(),
                foods,
            })
        })
        .collect()
}

/// Puts `quantity` of a food in the cart. Foods taken off the menu are
/// refused.
pub fn add_to_cart(
    cart: &Mutex<Cart>,
    notifier: &dyn Notifier,
    food: &Food,
    quantity: u32,
) -> Result<CartSummary> {
    if !food.is_available {
        notifier.notify(Notification::error(
            "Unavailable",
            "This item is not available right now.",
        ));
        return Err(Error::Validation(format!("{} is not available", food.title)));
    }

    let mut cart = lock(cart);
    cart.add(food, quantity);
    Ok(cart.summary())
}

/// Submits the cart as a new order for the signed-in customer. The cart is
/// emptied only once the order has been written.
pub fn place_order(
    session: &AuthSession,
    cart: &Mutex<Cart>,
    orders: &OrderCommands,
    notifier: &dyn Notifier,
    notes: Option<&str>,
) -> Result<String> {
    let Some(user) = session.current_user() else {
        notifier.notify(Notification::error(
            "Authentication Required",
            "Please sign in to place an order.",
        ));
        return Err(Error::Unauthenticated);
    };

    let draft = {
        let cart = lock(cart);
        if cart.is_empty() {
            notifier.notify(Notification::error(
                "Empty Cart",
                "Please add items to your cart before placing an order.",
            ));
            return Err(Error::Validation("cart is empty".to_string()));
        }

        CreateOrder {
            user_id: user.id.clone(),
            items: cart.to_order_items(),
            total_amount: cart.total_amount(),
            customer_notes: notes
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(str::to_string),
        }
    };

    match orders.create_order(draft) {
        Ok(order_id) => {
            lock(cart).clear();
            info!(order = %order_id, customer = %user.id, "order placed");
            Ok(order_id)
        }
        Err(e) => {
            error!(error = %e, "Error placing order");
            Err(e)
        }
    }
}
