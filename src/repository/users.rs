use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use sno_core::AppError;
use sno_models::{User, UserCredentials};

/// A user about to be stored, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Lookup of stored credentials by login, used only at login and
/// registration.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserCredentials>, AppError>;

    /// Fails with 400 when the login or email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}

pub(crate) fn duplicate_user() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Login or email already in use"))
}

#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self))]
    async fn find_by_login(&self, login: &str) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, login, email, first_name, last_name, password_hash
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login)
        .fetch_optional(&self.db)
        .await?;

        Ok(credentials)
    }

    #[instrument(skip(self, user), fields(login = %user.login))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, login, email, first_name, last_name
            "#,
        )
        .bind(&user.login)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await;

        match created {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(duplicate_user())
            }
            Err(e) => Err(e.into()),
        }
    }
}
