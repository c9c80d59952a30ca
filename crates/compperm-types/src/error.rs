//! Error hierarchy for compperm.

use crate::ticket::TicketId;
use thiserror::Error;

/// Errors from the host ticket store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ticket {id} does not exist")]
    TicketNotFound { id: TicketId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// True when the error means the ticket is gone, as opposed to the store failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::TicketNotFound { .. })
    }
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
