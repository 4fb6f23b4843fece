use crate::error::{Error, Result};
use crate::gateway::LocalGateway;
use crate::models::User;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// What the webview's federated pop-up hands back after the customer
/// picks an account.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FederatedCredential {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}

pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self, credential: FederatedCredential) -> Result<User>;
    fn sign_out(&self, user: &User) -> Result<()>;
}

/// Accepts credentials from the pop-up flow and keeps the `users`
/// collection in step with them.
pub struct LocalIdentityProvider {
    gateway: Arc<LocalGateway>,
}

impl LocalIdentityProvider {
    pub fn new(gateway: Arc<LocalGateway>) -> Self {
        LocalIdentityProvider { gateway }
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn sign_in(&self, credential: FederatedCredential) -> Result<User> {
        let uid = credential.uid.trim();
        if uid.is_empty() {
            return Err(Error::Identity("credential has no account id".to_string()));
        }

        let email = credential.email.unwrap_or_default();
        if !email.is_empty() && !email.contains('@') {
            return Err(Error::Identity(format!("invalid email address: {}", email)));
        }

        let user = User {
            id: uid.to_string(),
            display_name: credential.display_name.unwrap_or_default(),
            email,
            photo_url: credential.photo_url.filter(|url| !url.is_empty()),
        };

        self.gateway.register_user(&user)?;
        info!(user = %user.id, "signed in");

        Ok(user)
    }

    fn sign_out(&self, user: &User) -> Result<()> {
        info!(user = %user.id, "signed out");
        Ok(())
    }
}
