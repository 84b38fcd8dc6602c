//! # SNO Auth
//!
//! Stateless bearer tokens for the SNO API.
//!
//! - [`claims`]: the JWT payload and the [`Subject`] it identifies
//! - [`jwt`]: [`TokenService`], which issues and validates HS256 tokens
//!
//! Tokens are never stored server-side. A token is valid exactly when its
//! signature verifies against the configured secret and its `exp` lies in
//! the future; there is no revocation before expiry.
//!
//! ```ignore
//! use sno_auth::{Subject, TokenService};
//! use sno_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let issued = tokens.issue(&Subject::new("jdoe"))?;
//! assert_eq!(tokens.validate(&issued.access_token)?, Subject::new("jdoe"));
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Subject};
pub use jwt::{IssuedToken, TokenError, TokenService};
