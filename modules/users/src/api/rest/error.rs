use axum::{extract::rejection::JsonRejection, http::StatusCode};
use modkit::Problem;

use crate::domain::error::DomainError;

/// Map domain error to an RFC 9457 problem
pub fn map_domain_error(e: &DomainError, instance: &str) -> Problem {
    match e {
        DomainError::InvalidInput { field, message } => Problem::new(
            StatusCode::BAD_REQUEST,
            "USERS_VALIDATION",
            "Validation error",
            e.to_string(),
        )
        .with_field_error(field, message.clone())
        .at(instance),
        DomainError::UserNotFound { id } => Problem::new(
            StatusCode::NOT_FOUND,
            "USERS_NOT_FOUND",
            "User not found",
            format!("User with id {} was not found", id),
        )
        .at(instance),
        DomainError::Internal { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Internal error while handling users request");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "USERS_INTERNAL",
                "Internal error",
                "An internal error occurred",
            )
            .at(instance)
        }
    }
}

/// Problem for a request body that could not be decoded as JSON.
pub fn invalid_body(rejection: &JsonRejection, instance: &str) -> Problem {
    Problem::new(
        body_rejection_status(rejection.status()),
        "USERS_INVALID_BODY",
        "Invalid request body",
        rejection.body_text(),
    )
    .at(instance)
}

/// Every undecodable body is a client input error (400), except an
/// oversized one, which keeps 413.
fn body_rejection_status(status: StatusCode) -> StatusCode {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    }
}
