//! Session token issuance and validation (HS256 JWT).
//!
//! Validation fails closed: any decoding problem is reported as
//! `TokenStatus::Invalid`, never as an error or a panic.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{SigningKey, SECONDS_PER_HOUR};
use crate::domain::{User, UserRole};
use crate::errors::AppResult;

/// Who a token is issued to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
        }
    }
}

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email
    pub sub: String,
    pub uid: i64,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.uid,
            email: self.sub.clone(),
        }
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of validating a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid(Claims),
    Expired,
    Invalid,
}

impl TokenStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid(_))
    }

    pub fn claims(&self) -> Option<&Claims> {
        match self {
            TokenStatus::Valid(claims) => Some(claims),
            _ => None,
        }
    }

    pub fn into_claims(self) -> Option<Claims> {
        match self {
            TokenStatus::Valid(claims) => Some(claims),
            _ => None,
        }
    }
}

/// Signs and checks session tokens with one process-wide key
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(key: &SigningKey, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(key.as_bytes()),
            decoding: DecodingKey::from_secret(key.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_hours() * SECONDS_PER_HOUR
    }

    pub fn issue(&self, identity: &Identity, role: UserRole) -> AppResult<IssuedToken> {
        self.issue_at(identity, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> AppResult<IssuedToken> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: identity.email.clone(),
            uid: identity.user_id,
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    pub fn validate(&self, token: &str) -> TokenStatus {
        self.validate_at(token, Utc::now())
    }

    /// Validate against an explicit clock.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> TokenStatus {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the supplied clock.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return TokenStatus::Invalid;
            }
        };

        if claims.exp <= now.timestamp() {
            return TokenStatus::Expired;
        }
        TokenStatus::Valid(claims)
    }

    /// Subject of a currently valid token.
    pub fn extract_subject(&self, token: &str) -> Option<String> {
        self.validate(token).into_claims().map(|claims| claims.sub)
    }
}
