use thiserror::Error;

/// A document violated its structural or state-consistency contract.
///
/// Always recoverable by the caller (reject the write, reject the
/// response); carries the offending field path and a reason.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{entity}.{field}: {reason}")]
pub struct ValidationError {
    pub entity: &'static str,
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(entity: &'static str, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            entity,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The backing store failed a count/find/save call.
///
/// Propagated unchanged to the caller. For batch saves the first failure
/// is surfaced; documents already saved in the same batch stay saved.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store operation failed: {0}")]
    Backend(String),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_field_path() {
        let err = ValidationError::new("game", "status", "must be ongoing or finished");
        assert_eq!(err.to_string(), "game.status: must be ongoing or finished");
    }

    #[test]
    fn backend_error_keeps_store_message() {
        let err = PersistenceError::backend("connection reset");
        assert_eq!(err.to_string(), "store operation failed: connection reset");
    }
}
