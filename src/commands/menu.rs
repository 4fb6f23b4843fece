use super::AppStateExt;
use crate::cart::CartSummary;
use crate::error::Error;
use crate::hooks::lock;
use crate::hooks::orders::OrderScope;
use crate::screens::customer::{self, MenuSection};
use crate::screens::kitchen::OrderCard;
use tauri::AppHandle;

#[tauri::command]
pub fn get_menu(app: AppHandle) -> Result<Vec<MenuSection>, String> {
    app.kitchen()
        .with_foods(|foods| customer::menu_sections(&foods.foods()))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_cart(app: AppHandle) -> CartSummary {
    lock(&app.kitchen().cart).summary()
}

#[tauri::command]
pub fn add_to_cart(app: AppHandle, food_id: String, quantity: Option<u32>) -> Result<CartSummary, String> {
    let state = app.kitchen();

    let food = state
        .with_foods(|foods| foods.find(&food_id))
        .map_err(|e| e.to_string())?
        .ok_or_else(|| Error::not_found("foods", &food_id).to_string())?;

    customer::add_to_cart(&state.cart, state.notifier(), &food, quantity.unwrap_or(1))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn remove_from_cart(app: AppHandle, food_id: String) -> CartSummary {
    let mut cart = lock(&app.kitchen().cart);
    cart.remove(&food_id);
    cart.summary()
}

#[tauri::command]
pub fn set_cart_quantity(app: AppHandle, food_id: String, quantity: i64) -> CartSummary {
    let mut cart = lock(&app.kitchen().cart);
    cart.set_quantity(&food_id, quantity);
    cart.summary()
}

#[tauri::command]
pub fn clear_cart(app: AppHandle) -> CartSummary {
    let mut cart = lock(&app.kitchen().cart);
    cart.clear();
    cart.summary()
}

#[tauri::command]
pub fn place_order(app: AppHandle, notes: Option<String>) -> Result<String, String> {
    let state = app.kitchen();

    customer::place_order(
        &state.auth,
        &state.cart,
        &state.order_commands(),
        state.notifier(),
        notes.as_deref(),
    )
    .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn open_my_orders(app: AppHandle) -> Result<(), String> {
    let state = app.kitchen();
    let user = state
        .auth
        .current_user()
        .ok_or_else(|| Error::Unauthenticated.to_string())?;

    state
        .mount_orders(OrderScope::Customer(user.id))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_my_orders(app: AppHandle) -> Result<Vec<OrderCard>, String> {
    app.kitchen()
        .with_orders(|orders| orders.orders().into_iter().map(OrderCard::from).collect())
        .map_err(|e| e.to_string())
}
