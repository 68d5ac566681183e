//! Error types for the BizTime service.

/// Domain-level errors (input that violates business rules).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("amt must be a positive number")]
    NonPositiveAmount,

    #[error("code could not be derived from name")]
    UnderivableCode,

    #[error("code may only contain letters, digits, '-' and '_'")]
    InvalidCode,
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    /// A unique constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A foreign key pointed at a row that does not exist.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

/// Application-level errors (for HTTP responses).
///
/// Every variant carries the message sent to the client and maps to
/// exactly one HTTP status code. `Internal` is the catch-all for
/// unexpected failures; the others are expected, domain-level outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::Internal(_) => 500,
        }
    }

    /// The client-facing message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    /// True for anticipated outcomes (bad input, missing rows, conflicts).
    pub fn is_domain_error(&self) -> bool {
        !matches!(self, AppError::Internal(_))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(e) => AppError::Conflict(e),
            RepoError::InvalidReference(e) => AppError::BadRequest(e),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(AppError::NotFound("x".into()).status_code(), 404);
        assert_eq!(AppError::Conflict("x".into()).status_code(), 409);
        assert_eq!(AppError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_message_has_no_prefix() {
        let err = AppError::NotFound("Invoice with id of 0 does not exist.".into());
        assert_eq!(err.message(), "Invoice with id of 0 does not exist.");
    }

    #[test]
    fn test_domain_error_becomes_bad_request() {
        let err: AppError = DomainError::MissingField("amt").into();
        assert_eq!(err, AppError::BadRequest("amt is required".into()));
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_invalid_code_becomes_bad_request() {
        let err: AppError = DomainError::InvalidCode.into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "code may only contain letters, digits, '-' and '_'");
    }

    #[test]
    fn test_database_error_is_internal() {
        let err: AppError = RepoError::Database("connection reset".into()).into();
        assert_eq!(err, AppError::Internal("connection reset".into()));
        assert!(!err.is_domain_error());
    }
}
