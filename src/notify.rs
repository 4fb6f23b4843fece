use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

/// A transient message for the person at the screen.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn info(title: &str, description: &str) -> Self {
        Notification {
            title: title.to_string(),
            description: description.to_string(),
            variant: Variant::Default,
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Notification {
            title: title.to_string(),
            description: description.to_string(),
            variant: Variant::Destructive,
        }
    }
}

/// Which live mirror just received a push.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    Foods,
    Orders,
    Stats,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn refreshed(&self, _feed: Feed) {}
}

/// Holds notifications until the UI collects them.
#[derive(Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        match self.pending.lock() {
            Ok(mut pending) => pending.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}
