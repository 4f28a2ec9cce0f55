//! Authentication service - registration and login.
//!
//! Login never reveals whether an email is known: an unknown account still
//! pays for one password verification against a decoy hash.

use async_trait::async_trait;
use std::sync::Arc;

use super::token_service::{Identity, IssuedToken, TokenService};
use crate::domain::{NewUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::Storage;

/// Registration input after request validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Requested role; anything but "ADMIN" yields a regular user
    pub role: Option<String>,
}

/// Login input
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// A signed-in account
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: IssuedToken,
    pub user: User,
    pub total_bookings: u64,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign it in.
    ///
    /// Fails with `Conflict` when the email is taken.
    async fn register(&self, registration: Registration) -> AppResult<AuthSession>;

    /// Fails with `InvalidCredentials` for an unknown email or wrong
    /// password, and `RoleMismatch` when the password is right but the
    /// requested role is not the account's role.
    async fn login(&self, credentials: Credentials) -> AppResult<AuthSession>;
}

pub struct Authenticator<S: Storage> {
    storage: Arc<S>,
    tokens: TokenService,
}

impl<S: Storage> Authenticator<S> {
    pub fn new(storage: Arc<S>, tokens: TokenService) -> Self {
        Self { storage, tokens }
    }

    async fn open_session(&self, user: User) -> AppResult<AuthSession> {
        let token = self.tokens.issue(&Identity::from(&user), user.role)?;
        let total_bookings = self.storage.bookings().count_by_user_id(user.id).await?;
        Ok(AuthSession {
            token,
            user,
            total_bookings,
        })
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

#[async_trait]
impl<S: Storage> AuthService for Authenticator<S> {
    async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        let email = normalize_email(&registration.email);

        if self.storage.users().find_by_email(&email).await?.is_some() {
            tracing::info!(email = %email, "Registration refused, email taken");
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let role = UserRole::resolve_requested(registration.role.as_deref());

        let user = self
            .storage
            .users()
            .create(NewUser {
                email,
                password_hash,
                name: registration.name.trim().to_string(),
                phone: trimmed(registration.phone),
                address: trimmed(registration.address),
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        self.open_session(user).await
    }

    async fn login(&self, credentials: Credentials) -> AppResult<AuthSession> {
        let email = normalize_email(&credentials.email);

        let user = match self.storage.users().find_by_email(&email).await? {
            Some(user) => user,
            None => {
                Password::verify_decoy(&credentials.password);
                tracing::debug!("Login failed");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !Password::from_hash(user.password_hash.as_str()).verify(&credentials.password) {
            tracing::debug!(user_id = user.id, "Login failed");
            return Err(AppError::InvalidCredentials);
        }

        let role_ok = credentials
            .role
            .as_deref()
            .map(|requested| user.role.matches(requested))
            .unwrap_or(false);
        if !role_ok {
            tracing::debug!(user_id = user.id, "Login role mismatch");
            return Err(AppError::RoleMismatch);
        }

        tracing::info!(user_id = user.id, "User logged in");
        self.open_session(user).await
    }
}
