//! Application settings loaded from environment variables.

use std::env;

use argon2::password_hash::rand_core::{OsRng, RngCore};

use super::constants::{
    DEFAULT_CORS_ALLOWED_ORIGINS, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, GENERATED_SIGNING_KEY_BYTES, MAX_JWT_EXPIRATION_HOURS,
    MIN_JWT_SECRET_LENGTH,
};
use crate::domain::TransitionPolicy;
use crate::errors::{AppError, AppResult};

/// Symmetric key used to sign and verify session tokens.
///
/// Constructed once at startup and shared read-only for the lifetime of
/// the process.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl SigningKey {
    /// Generate a random key. It is never persisted, so tokens signed with
    /// it stop validating once the process exits.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; GENERATED_SIGNING_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Use a configured secret.
    ///
    /// # Errors
    /// Returns a validation error if the secret is shorter than
    /// `MIN_JWT_SECRET_LENGTH`.
    pub fn from_secret(secret: &str) -> AppResult<Self> {
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            bytes: secret.as_bytes().to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub signing_key: SigningKey,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub transition_policy: TransitionPolicy,
    pub uniform_auth_errors: bool,
    pub seed_on_startup: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("signing_key", &self.signing_key)
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("transition_policy", &self.transition_policy)
            .field("uniform_auth_errors", &self.uniform_auth_errors)
            .field("seed_on_startup", &self.seed_on_startup)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            signing_key: SigningKey::generate(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            transition_policy: TransitionPolicy::Permissive,
            uniform_auth_errors: false,
            seed_on_startup: true,
            cors_allowed_origins: split_origins(DEFAULT_CORS_ALLOWED_ORIGINS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// When `JWT_SECRET` is unset a random signing key is generated for
    /// this process.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let signing_key = match env::var("JWT_SECRET") {
            Ok(secret) => SigningKey::from_secret(&secret)?,
            Err(_) => {
                tracing::warn!(
                    "JWT_SECRET not set, generating a per-process signing key; tokens will not survive a restart"
                );
                SigningKey::generate()
            }
        };

        let transition_policy = if env_flag("STRICT_TRANSITIONS", false) {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            signing_key,
            jwt_expiration_hours: token_ttl_hours(
                env::var("JWT_EXPIRATION_HOURS").ok().as_deref(),
            )?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            transition_policy,
            uniform_auth_errors: env_flag("UNIFORM_AUTH_ERRORS", false),
            seed_on_startup: env_flag("SEED_ON_STARTUP", true),
            cors_allowed_origins: split_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGINS.to_string()),
            ),
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Token lifetime from `JWT_EXPIRATION_HOURS`, defaulting when unset.
fn token_ttl_hours(raw: Option<&str>) -> AppResult<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_JWT_EXPIRATION_HOURS);
    };

    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation("JWT_EXPIRATION_HOURS must be a whole number of hours"))?;
    if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) {
        return Err(AppError::validation(format!(
            "JWT_EXPIRATION_HOURS must be between 1 and {}",
            MAX_JWT_EXPIRATION_HOURS
        )));
    }
    Ok(hours)
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
