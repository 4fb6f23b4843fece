use super::AppStateExt;
use crate::identity::FederatedCredential;
use crate::models::User;
use tauri::AppHandle;

#[tauri::command]
pub fn sign_in(app: AppHandle, credential: FederatedCredential) -> Option<User> {
    app.kitchen().auth.sign_in(credential)
}

#[tauri::command]
pub fn sign_out(app: AppHandle) {
    let state = app.kitchen();
    state.auth.sign_out();
    state.unmount_customer_orders();
}

#[tauri::command]
pub fn current_user(app: AppHandle) -> Option<User> {
    app.kitchen().auth.current_user()
}
