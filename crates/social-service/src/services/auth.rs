//! Authentication service
//!
//! Handles registration, login, logout and per-request credential checks.
//! Browser clients carry a server-side session id in a cookie; other clients
//! may send a bearer token that is bound to the same session.

use social_cache::SessionData;
use social_common::auth::{hash_password, validate_password_strength, verify_password};
use social_common::AppError;
use social_core::entities::User;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, SessionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Result of a successful login
#[derive(Debug)]
pub struct LoginOutcome {
    /// Id of the server-side session, to be set as a cookie
    pub session_id: String,
    pub response: AuthResponse,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;
        validate_password_strength(&request.password)?;

        let email = request.email.trim().to_lowercase();
        let username = request.username.trim().to_string();

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(social_core::DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(social_core::DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let mut user = User::new(self.ctx.generate_id(), username, email);
        user.set_display_name(request.display_name);

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Login with email and password, opening a new session
    #[instrument(skip(self, request, user_agent))]
    pub async fn login(
        &self,
        request: LoginRequest,
        user_agent: Option<String>,
    ) -> ServiceResult<LoginOutcome> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let mut session = SessionData::new(user.id);
        if let Some(agent) = user_agent {
            session = session.with_user_agent(agent);
        }
        let session_id = self.ctx.session_store().create(&session).await?;

        let token = self.ctx.jwt_service().issue(user.id, &session_id)?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginOutcome {
            session_id,
            response: AuthResponse::new(
                token.access_token,
                token.expires_in,
                CurrentUserResponse::from(&user),
            ),
        })
    }

    /// Destroy a session; logging out twice is not an error
    #[instrument(skip(self, session_id))]
    pub async fn logout(&self, session_id: &str) -> ServiceResult<()> {
        if self.ctx.session_store().destroy(session_id).await? {
            info!("Session destroyed");
        }
        Ok(())
    }

    /// Resolve the user behind a session cookie
    ///
    /// Each successful lookup slides the session expiry forward.
    #[instrument(skip(self, session_id))]
    pub async fn authenticate_session(&self, session_id: &str) -> ServiceResult<User> {
        let session = self
            .ctx
            .session_store()
            .get(session_id)
            .await?
            .ok_or(ServiceError::App(AppError::SessionExpired))?;

        self.ctx.session_store().touch(session_id).await?;

        self.ctx
            .user_repo()
            .find_by_id(session.user_id)
            .await?
            .ok_or(ServiceError::App(AppError::SessionExpired))
    }

    /// Resolve the user behind a bearer token
    ///
    /// The token is only accepted while the session it was issued with is
    /// still alive.
    #[instrument(skip(self, token))]
    pub async fn authenticate_token(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate(token)?;
        let user_id = claims.user_id()?;

        let session = self
            .ctx
            .session_store()
            .get(&claims.sid)
            .await?
            .ok_or(ServiceError::App(AppError::SessionExpired))?;

        if session.user_id != user_id {
            warn!(user_id = %user_id, "Token does not match its session");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        self.ctx.session_store().touch(&claims.sid).await?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }

    /// Describe the session behind a cookie
    #[instrument(skip(self, session_id))]
    pub async fn session_status(&self, session_id: &str) -> ServiceResult<SessionResponse> {
        let user = self.authenticate_session(session_id).await?;
        Ok(SessionResponse {
            authenticated: true,
            user: CurrentUserResponse::from(&user),
        })
    }
}
