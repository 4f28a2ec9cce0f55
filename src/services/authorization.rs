//! Authorization gate: token + required role -> allow or deny.

use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};

use super::token_service::{TokenService, TokenStatus};

/// Identity resolved from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Allow admins, or the user whose data is being touched.
    pub fn ensure_self_or_admin(&self, user_id: i64) -> AppResult<()> {
        if self.is_admin() || self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Owner for a record being created: the requested user when allowed,
    /// otherwise the caller.
    pub fn resolve_owner(&self, requested: Option<i64>) -> AppResult<i64> {
        let owner = requested.unwrap_or(self.user_id);
        self.ensure_self_or_admin(owner)?;
        Ok(owner)
    }
}

/// Checks bearer tokens against an operation's role requirement
#[derive(Clone)]
pub struct AuthorizationGate {
    tokens: TokenService,
}

impl AuthorizationGate {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn authorize(&self, token: Option<&str>, required: Option<UserRole>) -> AppResult<CurrentUser> {
        let token = token.ok_or(AppError::Unauthenticated)?;

        let claims = match self.tokens.validate(token) {
            TokenStatus::Valid(claims) => claims,
            TokenStatus::Expired => {
                tracing::debug!("Expired session token presented");
                return Err(AppError::Unauthenticated);
            }
            TokenStatus::Invalid => return Err(AppError::Unauthenticated),
        };

        // A token carrying a role we don't know is not a session we issued.
        let role = UserRole::parse(&claims.role).ok_or(AppError::Unauthenticated)?;

        if let Some(required) = required {
            if !required.matches(&claims.role) {
                tracing::debug!(user_id = claims.uid, required = %required, "Role check failed");
                return Err(AppError::Forbidden);
            }
        }

        Ok(CurrentUser {
            user_id: claims.uid,
            email: claims.sub,
            role,
        })
    }
}
