//! Error type shared by every ledger operation.

use thiserror::Error;

/// Why a ledger command was rejected.
///
/// Every variant is recoverable: the caller can correct the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Diary type '{0}' is unknown or not enabled")]
    InvalidType(String),

    #[error("Quantity {0} is outside the allowed range 1..=500")]
    InvalidQuantity(i64),

    #[error("Cannot {action} {entity} {id}: {reason}")]
    InvalidTransition {
        entity: &'static str,
        id: String,
        action: &'static str,
        reason: String,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Diary {0} already exists in the ledger")]
    DuplicateId(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidType(_) => "INVALID_TYPE",
            LedgerError::InvalidQuantity(_) => "INVALID_QUANTITY",
            LedgerError::InvalidTransition { .. } => "INVALID_TRANSITION",
            LedgerError::NotFound { .. } => "NOT_FOUND",
            LedgerError::DuplicateId(_) => "DUPLICATE_ID",
            LedgerError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub(crate) fn diary_not_found(id: &str) -> Self {
        LedgerError::NotFound {
            entity: "diary",
            id: id.to_string(),
        }
    }

    pub(crate) fn request_not_found(id: &str) -> Self {
        LedgerError::NotFound {
            entity: "request",
            id: id.to_string(),
        }
    }

    pub(crate) fn notification_not_found(id: &str) -> Self {
        LedgerError::NotFound {
            entity: "notification",
            id: id.to_string(),
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
