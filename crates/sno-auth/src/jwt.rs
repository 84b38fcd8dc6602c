//! HS256 token issuing and validation.
//!
//! [`TokenService`] derives its keys once from [`JwtConfig`] and is cheap to
//! clone; every clone shares the same keys. Validation never panics and
//! reports failures as [`TokenError`], which callers are expected to collapse
//! into a single "unauthorized" outcome.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use sno_config::JwtConfig;
use sno_core::AppError;

use crate::claims::{Claims, Subject};

/// Why a presented token was refused. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

impl TokenError {
    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Expiry, Unix seconds
    pub expires_at: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime_secs: i64,
}

#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime_secs", &self.keys.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                validation,
                lifetime_secs: config.access_token_expiry,
            }),
        }
    }

    pub fn lifetime_secs(&self) -> i64 {
        self.keys.lifetime_secs
    }

    /// Issues a token for `subject`, valid from now for the configured lifetime.
    pub fn issue(&self, subject: &Subject) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issues a token as if it had been created at `issued_at` (Unix seconds).
    pub fn issue_at(&self, subject: &Subject, issued_at: i64) -> Result<IssuedToken, AppError> {
        let exp = issued_at
            .checked_add(self.keys.lifetime_secs)
            .ok_or_else(|| AppError::internal_error("Token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: subject.as_str().to_string(),
            iat: issued_at,
            exp,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_at: claims.exp,
        })
    }

    /// Checks signature and expiry and returns the subject the token names.
    pub fn validate(&self, token: &str) -> Result<Subject, TokenError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.keys.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            },
        )?;

        // The library accepts exp == now; a token is only valid strictly before expiry.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::Malformed);
        }

        Ok(Subject::new(data.claims.sub))
    }
}
