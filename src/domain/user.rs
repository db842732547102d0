//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Absent for accounts that only sign in through an OAuth provider
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_oauth: bool,
    pub is_enable: bool,
    pub create_at: DateTime<Utc>,
    pub update_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether this account can sign in with a password.
    pub fn has_password(&self) -> bool {
        !self.is_oauth && self.password_hash.is_some()
    }
}

/// Provider credentials for an OAuth-only account
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthAccount {
    pub id: i32,
    pub user_id: i32,
    pub provider: String,
    pub access_token: String,
    pub create_at: DateTime<Utc>,
    pub update_at: Option<DateTime<Utc>>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "andy")]
    pub username: String,
    #[schema(example = "andy@example.com")]
    pub email: String,
    pub is_oauth: bool,
    pub create_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_oauth: user.is_oauth,
            create_at: user.create_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_oauth: bool, password_hash: Option<&str>) -> User {
        User {
            id: 1,
            username: "andy".to_string(),
            email: "andy@example.com".to_string(),
            password_hash: password_hash.map(str::to_string),
            is_oauth,
            is_enable: true,
            create_at: Utc::now(),
            update_at: None,
        }
    }

    #[test]
    fn test_has_password() {
        assert!(user(false, Some("hash")).has_password());
        assert!(!user(true, None).has_password());
        assert!(!user(false, None).has_password());
    }

    #[test]
    fn test_serialization_hides_password_hash() {
        let json = serde_json::to_string(&user(false, Some("secret-hash"))).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
