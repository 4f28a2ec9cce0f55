//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Role requested at registration: only an explicit "ADMIN"
    /// (any case, surrounding whitespace ignored) grants admin.
    pub fn resolve_requested(requested: Option<&str>) -> Self {
        match requested {
            Some(role) if role.trim().eq_ignore_ascii_case(ROLE_ADMIN) => UserRole::Admin,
            _ => UserRole::User,
        }
    }

    /// Parse a role name case-insensitively. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(ROLE_ADMIN) {
            Some(UserRole::Admin)
        } else if raw.eq_ignore_ascii_case(ROLE_USER) {
            Some(UserRole::User)
        } else {
            None
        }
    }

    /// Case-insensitive comparison against a raw role name
    pub fn matches(&self, raw: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(raw.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub join_date: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data needed to persist a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "user@rentx.com")]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[schema(example = "USER")]
    pub role: String,
    pub join_date: DateTime<Utc>,
    /// Number of bookings owned by the user
    pub total_bookings: u64,
}

impl UserResponse {
    pub fn new(user: User, total_bookings: u64) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role.to_string(),
            join_date: user.join_date,
            total_bookings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requested_role() {
        assert_eq!(UserRole::resolve_requested(Some("ADMIN")), UserRole::Admin);
        assert_eq!(UserRole::resolve_requested(Some(" admin ")), UserRole::Admin);
        assert_eq!(UserRole::resolve_requested(Some("USER")), UserRole::User);
        assert_eq!(UserRole::resolve_requested(Some("superuser")), UserRole::User);
        assert_eq!(UserRole::resolve_requested(Some("")), UserRole::User);
        assert_eq!(UserRole::resolve_requested(None), UserRole::User);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(UserRole::parse("Admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("user"), Some(UserRole::User));
        assert_eq!(UserRole::parse("root"), None);
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(UserRole::User.to_string(), "USER");
    }

    #[test]
    fn test_matches() {
        assert!(UserRole::Admin.matches("admin"));
        assert!(!UserRole::User.matches("ADMIN"));
    }
}
