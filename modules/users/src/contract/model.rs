use chrono::{DateTime, Utc};

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque identifier, assigned once at creation.
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update data for a user.
///
/// `None` leaves the field as is. An empty string is treated the same way:
/// name and email are never blank, so there is no "clear" operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Build a patch from plain strings where "" means "leave unchanged".
    pub fn from_fields(name: impl Into<String>, email: impl Into<String>) -> Self {
        let non_empty = |s: String| (!s.is_empty()).then_some(s);
        Self {
            name: non_empty(name.into()),
            email: non_empty(email.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_noop(patch: &UserPatch) -> bool {
        patch.name.as_deref().map_or(true, str::is_empty)
            && patch.email.as_deref().map_or(true, str::is_empty)
    }

    #[test]
    fn from_fields_drops_empty_strings() {
        let patch = UserPatch::from_fields("Alicia", "");
        assert_eq!(patch.name.as_deref(), Some("Alicia"));
        assert_eq!(patch.email, None);
        assert!(!is_noop(&patch));
    }

    #[test]
    fn empty_values_count_as_noop() {
        assert!(is_noop(&UserPatch::default()));
        assert!(is_noop(&UserPatch {
            name: Some(String::new()),
            email: None,
        }));
    }
}
