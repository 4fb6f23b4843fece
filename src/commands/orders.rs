use super::AppStateExt;
use crate::hooks::orders::OrderScope;
use crate::models::OrderStatus;
use crate::screens::kitchen::{self, KitchenBoard};
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tracing::warn;

#[tauri::command]
pub fn open_kitchen_orders(app: AppHandle) -> Result<(), String> {
    app.kitchen()
        .mount_orders(OrderScope::All)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn close_orders(app: AppHandle) {
    app.kitchen().unmount_orders();
}

#[tauri::command]
pub fn get_kitchen_board(app: AppHandle) -> Result<KitchenBoard, String> {
    app.kitchen()
        .with_orders(|orders| kitchen::board(&orders.orders()))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn advance_order(app: AppHandle, order_id: String) -> Result<OrderStatus, String> {
    app.kitchen()
        .with_orders(|orders| kitchen::advance_order(orders, &order_id))
        .and_then(|advanced| advanced)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_order_status(app: AppHandle, order_id: String, status: OrderStatus) -> Result<(), String> {
    app.kitchen()
        .with_orders(|orders| kitchen::move_order(orders, &order_id, status))
        .and_then(|moved| moved)
        .map_err(|e| e.to_string())
}

/// Asks for confirmation, then deletes the order if it is still pending.
#[tauri::command]
pub fn delete_order(app: AppHandle, order_id: String) {
    let handle = app.clone();

    app.dialog()
        .message("Are you sure you want to delete this order?")
        .title("Delete order")
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancel)
        .show(move |confirmed| {
            if !confirmed {
                return;
            }
            let deleted = handle
                .kitchen()
                .with_orders(|orders| kitchen::delete_order(orders, &order_id))
                .and_then(|deleted| deleted);
            if let Err(e) = deleted {
                warn!(error = %e, order = %order_id, "order not deleted");
            }
        });
}
