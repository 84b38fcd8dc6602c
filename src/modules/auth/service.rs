use tracing::{debug, instrument};

use crate::metrics::{track_login, track_user_registered};
use crate::repository::{CredentialStore, NewUser};
use sno_auth::{Subject, TokenService};
use sno_core::{AppError, hash_password, verify_password, verify_without_user};
use sno_models::{LoginRequest, LoginResponse, RegisterRequest, User};

pub const INVALID_CREDENTIALS: &str = "Invalid login or password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto), fields(login = %dto.login))]
    pub async fn register_user(
        users: &dyn CredentialStore,
        dto: RegisterRequest,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = users
            .create(NewUser {
                login: dto.login,
                email: dto.email,
                first_name: dto.first_name,
                last_name: dto.last_name,
                password_hash,
            })
            .await?;

        track_user_registered();
        Ok(user)
    }

    /// Verifies the password and issues a token straight away. An unknown
    /// login and a wrong password fail identically, bcrypt cost included.
    #[instrument(skip(users, tokens, dto), fields(login = %dto.login))]
    pub async fn login_user(
        users: &dyn CredentialStore,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let Some(credentials) = users.find_by_login(&dto.login).await? else {
            debug!("Unknown login");
            verify_without_user(&dto.password);
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            debug!("Wrong password");
            track_login(false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let issued = tokens.issue(&Subject::new(credentials.user.login.clone()))?;
        track_login(true);

        Ok(LoginResponse {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_at: issued.expires_at,
            user: credentials.user,
        })
    }

    #[instrument(skip(users))]
    pub async fn current_user(
        users: &dyn CredentialStore,
        subject: &Subject,
    ) -> Result<User, AppError> {
        users
            .find_by_login(subject.as_str())
            .await?
            .map(|credentials| credentials.user)
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
