//! The logged-in user's identity for one browser session.
//!
//! A [`SessionUser`] is created from the Discord profile fetched on a
//! successful OAuth callback and lives only in the signed session cookie.
//! It is never written to the database; reports carry an immutable snapshot
//! of the display tag instead.

use serde::{Deserialize, Serialize};

/// The authenticated user's identity, as reported by Discord at login time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Stable Discord user ID.
    pub id: String,
    /// Discord username at login time.
    pub username: String,
    /// Discord discriminator. Accounts migrated to unique usernames
    /// report `"0"`.
    pub discriminator: String,
    /// Avatar hash, if the user has one set.
    pub avatar: Option<String>,
}

impl SessionUser {
    /// Returns the `username#discriminator` display form used to attribute
    /// submitted reports.
    #[must_use]
    pub fn display_tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> SessionUser {
        SessionUser {
            id: "1234567890".to_string(),
            username: "alice".to_string(),
            discriminator: "0001".to_string(),
            avatar: Some("a1b2c3".to_string()),
        }
    }

    #[test]
    fn display_tag_joins_username_and_discriminator() {
        assert_eq!(test_user().display_tag(), "alice#0001");
    }

    #[test]
    fn display_tag_with_migrated_account() {
        let user = SessionUser {
            discriminator: "0".to_string(),
            ..test_user()
        };
        assert_eq!(user.display_tag(), "alice#0");
    }

    #[test]
    fn serialization_roundtrip() {
        let user = test_user();
        let json = serde_json::to_string(&user).expect("serialize");
        let parsed: SessionUser = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(user, parsed);
    }

    #[test]
    fn deserializes_with_null_avatar() {
        let json = r#"{"id":"42","username":"bob","discriminator":"9999","avatar":null}"#;
        let user: SessionUser = serde_json::from_str(json).expect("deserialize");
        assert_eq!(user.id, "42");
        assert!(user.avatar.is_none());
    }
}
