//! Authentication handlers
//!
//! Endpoints for registration, login, logout and session status. Browsers
//! authenticate with the HttpOnly session cookie set on login; other
//! clients may send the returned access token as a bearer token.

use axum::{extract::State, Json};
use axum_extra::{
    extract::cookie::{Cookie, CookieJar, SameSite},
    headers::UserAgent,
    TypedHeader,
};
use social_service::{
    AuthResponse, AuthService, CurrentUserResponse, LoginRequest, RegisterRequest,
    SessionResponse,
};

use crate::extractors::{SessionId, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

fn session_cookie(state: &AppState, session_id: String) -> Cookie<'static> {
    Cookie::build((state.cookie_name().to_string(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure())
        .build()
}

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<CurrentUserResponse>>> {
    let service = AuthService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(user)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let user_agent = user_agent.map(|TypedHeader(ua)| ua.as_str().to_string());
    let outcome = service.login(request, user_agent).await?;

    let jar = jar.add(session_cookie(&state, outcome.session_id));
    Ok((jar, Json(outcome.response)))
}

/// Logout and revoke the session
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    SessionId(session_id): SessionId,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = AuthService::new(state.service_context());
    service.logout(&session_id).await?;

    let jar = jar.remove(Cookie::build((state.cookie_name().to_string(), "")).path("/"));
    Ok((jar, NoContent))
}

/// Describe the current session
///
/// GET /auth/session
pub async fn session(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> ApiResult<Json<SessionResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.session_status(&session_id).await?;
    Ok(Json(response))
}
