//! Account and session endpoints.

use axum::{extract::State, Extension, Json};
use axum_extra::extract::{CookieJar, WithRejection};

use super::{blocking, created, success, ApiResponse, ApiResult};
use crate::auth::{end_session, password, removal_cookie, session_cookie, SESSION_COOKIE};
use crate::errors::AppError;
use crate::models::{LoginRequest, RegisterRequest, SessionUser, UserProfile};
use crate::AppState;

/// POST /auth/register - Create an account.
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> ApiResult<SessionUser> {
    let new_user = request.validate()?;

    if state.repo.find_user_by_email(&new_user.email).await?.is_some() {
        return Err(AppError::Duplicate("Email already registered".to_string()));
    }

    let plain = new_user.password.clone();
    let password_hash = blocking(move || password::hash_password(&plain)).await?;
    let user = state.repo.create_user(&new_user, &password_hash).await?;

    tracing::info!("Registered user {}", user.id);

    created(SessionUser::from(&user), "User registered successfully")
}

/// POST /auth/login - Verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<(CookieJar, ApiResponse<SessionUser>), AppError> {
    let (Some(email), Some(plain)) = (
        request.email.map(|e| e.trim().to_lowercase()).filter(|e| !e.is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation("Please fill all the fields".to_string()));
    };

    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .repo
        .find_user_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    let hash = user.password_hash.clone();
    if !blocking(move || password::verify_password(&plain, &hash)).await? {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    match state.repo.purge_expired_sessions().await {
        Ok(0) => {}
        Ok(n) => tracing::debug!("Purged {} expired sessions", n),
        Err(e) => tracing::warn!("Failed to purge expired sessions: {}", e),
    }

    let session = state
        .repo
        .create_session(&user.id, state.config.session_ttl)
        .await?;
    let jar = jar.add(session_cookie(&session, state.config.cookie_secure));

    Ok((
        jar,
        ApiResponse::new(SessionUser::from(&user), "Login successful"),
    ))
}

/// POST /auth/logout - End the current session, if any.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<()>), AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        end_session(&state.repo, cookie.value()).await?;
    }

    Ok((
        jar.remove(removal_cookie()),
        ApiResponse::new((), "Logged out successfully"),
    ))
}

/// GET /auth/me - The logged-in user's profile.
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> ApiResult<UserProfile> {
    let account = state
        .repo
        .get_user(&user.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    success(UserProfile::from(&account), "User retrieved successfully")
}
