use super::lock;
use crate::identity::{FederatedCredential, IdentityProvider};
use crate::models::User;
use crate::notify::{Notification, Notifier};
use std::sync::{Arc, Mutex};
use tracing::error;

/// The signed-in customer, if any. Sign-in and sign-out failures are
/// reported to the notifier and otherwise swallowed.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    user: Mutex<Option<User>>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn IdentityProvider>, notifier: Arc<dyn Notifier>) -> Self {
        AuthSession {
            provider,
            notifier,
            user: Mutex::new(None),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        lock(&self.user).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        lock(&self.user).is_some()
    }

    pub fn sign_in(&self, credential: FederatedCredential) -> Option<User> {
        match self.provider.sign_in(credential) {
            Ok(user) => {
                *lock(&self.user) = Some(user.clone());
                self.notifier
                    .notify(Notification::info("Welcome!", "Successfully signed in with Google."));
                Some(user)
            }
            Err(e) => {
                error!(error = %e, "Error signing in");
                self.notifier
                    .notify(Notification::error("Error", "Failed to sign in. Please try again."));
                None
            }
        }
    }

    pub fn sign_out(&self) {
        let Some(user) = self.current_user() else {
            return;
        };

        match self.provider.sign_out(&user) {
            Ok(()) => {
                *lock(&self.user) = None;
                self.notifier
                    .notify(Notification::info("Goodbye!", "Successfully signed out."));
            }
            Err(e) => {
                error!(error = %e, "Error signing out");
                self.notifier
                    .notify(Notification::error("Error", "Failed to sign out. Please try again."));
            }
        }
    }
}
