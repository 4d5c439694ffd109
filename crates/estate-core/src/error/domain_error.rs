//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::ObjectId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(ObjectId),

    #[error("Offer not found: {0}")]
    OfferNotFound(ObjectId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::OfferNotFound(_) => "UNKNOWN_OFFER",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::OfferNotFound(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ObjectId {
        ObjectId::from_bytes([0xab; 12])
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::OfferNotFound(id()).code(), "UNKNOWN_OFFER");
        assert_eq!(DomainError::EmailAlreadyExists.code(), "EMAIL_ALREADY_EXISTS");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::UserNotFound(id()).is_not_found());
        assert!(DomainError::EmailAlreadyExists.is_conflict());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::OfferNotFound(id()).status_code(), 404);
        assert_eq!(DomainError::EmailAlreadyExists.status_code(), 409);
        assert_eq!(DomainError::DatabaseError("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::OfferNotFound(id());
        assert_eq!(err.to_string(), format!("Offer not found: {}", "ab".repeat(12)));
    }
}
