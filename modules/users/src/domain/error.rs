use thiserror::Error;

/// Closed set of failures produced by the domain layer.
///
/// The repository only ever yields `UserNotFound`; the service adds
/// `InvalidInput`; `Internal` covers anything unexpected from storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Invalid input: {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::invalid_input(field, "must not be empty")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
