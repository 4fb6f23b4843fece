use crate::models::OrderStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Malformed document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("{collection} document not found: {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please sign in to continue")]
    Unauthenticated,

    #[error("Sign-in rejected: {0}")]
    Identity(String),

    #[error("Order {id} is {status} and cannot be {action}")]
    InvalidTransition {
        id: String,
        status: OrderStatus,
        action: &'static str,
    },

    #[error("The {0} view is not open")]
    NotMounted(&'static str),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State lock poisoned")]
    Poisoned,
}

impl Error {
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            collection,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
