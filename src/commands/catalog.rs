use super::AppStateExt;
use crate::error::Error;
use crate::models::Food;
use crate::screens::catalog::{self, FoodForm};
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tracing::warn;

#[tauri::command]
pub fn get_foods(app: AppHandle) -> Result<Vec<Food>, String> {
    app.kitchen()
        .with_foods(|foods| foods.foods())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_food_form(app: AppHandle, food_id: Option<String>) -> Result<FoodForm, String> {
    let Some(food_id) = food_id else {
        return Ok(FoodForm::default());
    };

    app.kitchen()
        .with_foods(|foods| foods.find(&food_id))
        .map_err(|e| e.to_string())?
        .map(|food| FoodForm::from_food(&food))
        .ok_or_else(|| Error::not_found("foods", food_id).to_string())
}

#[tauri::command]
pub fn save_food(app: AppHandle, editing_id: Option<String>, form: FoodForm) -> Result<String, String> {
    let state = app.kitchen();

    catalog::save_food(
        &state.food_commands(),
        state.notifier(),
        editing_id.as_deref(),
        form,
    )
    .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn toggle_food_availability(app: AppHandle, food_id: String) -> Result<(), String> {
    let state = app.kitchen();

    let food = state
        .with_foods(|foods| foods.find(&food_id))
        .map_err(|e| e.to_string())?
        .ok_or_else(|| Error::not_found("foods", &food_id).to_string())?;

    catalog::toggle_availability(&state.food_commands(), &food).map_err(|e| e.to_string())
}

/// Asks for confirmation, then removes the menu item.
#[tauri::command]
pub fn delete_food(app: AppHandle, food_id: String, title: String) {
    let handle = app.clone();

    app.dialog()
        .message(format!("Are you sure you want to delete \"{}\"?", title))
        .title("Delete menu item")
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancel)
        .show(move |confirmed| {
            if !confirmed {
                return;
            }
            let state = handle.kitchen();
            if let Err(e) = catalog::delete_food(&state.food_commands(), &food_id) {
                warn!(error = %e, food = %food_id, "menu item not deleted");
            }
        });
}
