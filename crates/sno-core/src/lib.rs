//! # SNO Core
//!
//! Core types, errors, and utilities shared by every SNO API crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page/offset query parameters and response metadata
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use sno_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secret-password")?;
//! assert!(verify_password("secret-password", &hash)?);
//!
//! let error = AppError::not_found(anyhow::anyhow!("Lecture with ID 7 not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password, verify_without_user};
