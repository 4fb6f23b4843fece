//! Live mirrors of the gateway's collections, one per screen concern.
//!
//! A hook opens a watch when it is created and cancels it when dropped.
//! Every push replaces the mirrored data wholesale; mutations go straight
//! to the gateway and never touch the mirror, so the next push is the only
//! way local state changes.

pub mod auth;
pub mod foods;
pub mod orders;
pub mod stats;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
pub struct Mirror<T> {
    pub data: T,
    pub loading: bool,
    pub failed: bool,
}

impl<T: Default> Default for Mirror<T> {
    fn default() -> Self {
        Mirror {
            data: T::default(),
            loading: true,
            failed: false,
        }
    }
}

impl<T> Mirror<T> {
    fn loaded(&mut self, data: T) {
        self.data = data;
        self.loading = false;
        self.failed = false;
    }

    fn load_failed(&mut self) {
        self.loading = false;
        self.failed = true;
    }
}

pub(crate) type SharedMirror<T> = Arc<Mutex<Mirror<T>>>;

pub(crate) fn lock<T>(mirror: &Mutex<T>) -> MutexGuard<'_, T> {
    mirror.lock().unwrap_or_else(PoisonError::into_inner)
}
