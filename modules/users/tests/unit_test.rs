use users::contract::error::UsersError;
use users::domain::error::DomainError;

#[test]
fn test_domain_errors_map_to_contract_errors() {
    assert_eq!(
        UsersError::from(DomainError::user_not_found("42")),
        UsersError::not_found("42")
    );
    assert_eq!(
        UsersError::from(DomainError::empty_field("email")),
        UsersError::validation("email: must not be empty")
    );
    assert_eq!(
        UsersError::from(DomainError::internal("lock poisoned")),
        UsersError::Internal
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(UsersError::not_found("42").to_string(), "User not found: 42");
    assert_eq!(
        UsersError::validation("name: must not be empty").to_string(),
        "Validation error: name: must not be empty"
    );
    assert_eq!(UsersError::internal().to_string(), "Internal error");
}

#[test]
fn test_internal_error_hides_cause() {
    let err = UsersError::from(DomainError::internal("disk full"));
    assert!(!err.to_string().contains("disk"));
}
