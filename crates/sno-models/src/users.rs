//! Users, stored credentials and authentication DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    /// Unique login, also the subject of issued tokens
    #[schema(example = "ivanov")]
    pub login: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A user together with the bcrypt hash of their password. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "login must be 3-64 characters"))]
    pub login: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "login is required"))]
    pub login: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token expiry, Unix seconds
    pub expires_at: i64,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(login: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            login: login.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register("ivanov", "ivanov@example.com", "password123").validate().is_ok());
        assert!(register("iv", "ivanov@example.com", "password123").validate().is_err());
        assert!(register("ivanov", "not-an-email", "password123").validate().is_err());
        assert!(register("ivanov", "ivanov@example.com", "short").validate().is_err());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let empty = LoginRequest {
            login: String::new(),
            password: "x".to_string(),
        };
        assert!(empty.validate().is_err());
    }
}
