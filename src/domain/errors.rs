use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the domain layer and its repository ports
///
/// Missing performance data is never an error; it aggregates as zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DomainError {
    /// Creates a NotFound error for the given entity kind
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an InvalidInput error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a StorageUnavailable error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let id = Uuid::new_v4();
        let err = DomainError::not_found("League", id);

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("League not found: {}", id));
    }

    #[test]
    fn conflict_and_invalid_messages() {
        assert_eq!(
            DomainError::conflict("roster exists").to_string(),
            "Conflict: roster exists"
        );
        assert_eq!(
            DomainError::invalid("negative goals").to_string(),
            "Invalid input: negative goals"
        );
        assert!(!DomainError::storage("down").is_not_found());
    }
}
