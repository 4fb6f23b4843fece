pub mod auth;
pub mod catalog;
pub mod menu;
pub mod orders;
pub mod reports;

use crate::notify::{Feed, Notification, Notifier};
use crate::state::AppState;
use tauri::{AppHandle, Emitter, Manager};
use tracing::warn;

pub trait AppStateExt {
    fn kitchen(&self) -> &AppState;
}

impl AppStateExt for AppHandle {
    fn kitchen(&self) -> &AppState {
        self.state::<AppState>().inner()
    }
}

/// Forwards notifications and mirror pushes to the webview as events.
pub struct TauriNotifier {
    app: AppHandle,
}

impl TauriNotifier {
    pub fn new(app: AppHandle) -> Self {
        TauriNotifier { app }
    }
}

impl Notifier for TauriNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.app.emit("notification", &notification) {
            warn!(error = %e, "failed to emit notification");
        }
    }

    fn refreshed(&self, feed: Feed) {
        if let Err(e) = self.app.emit("feed-updated", feed) {
            warn!(error = %e, "failed to emit feed update");
        }
    }
}
