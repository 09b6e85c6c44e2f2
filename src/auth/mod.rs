//! Cookie session authentication.
//!
//! The session cookie carries `<session id>.<secret>`. The id selects the
//! stored session and the secret is compared in constant time.

pub mod password;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use subtle::ConstantTimeEq;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{split_token, Session, SessionUser, User};
use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "itnav.sid";

/// Middleware for routes that need a logged-in user.
///
/// Inserts the caller's [`SessionUser`] into the request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
        .ok_or_else(not_authenticated)?;

    let user = authenticate(&state.repo, token)
        .await?
        .ok_or_else(not_authenticated)?;

    request.extensions_mut().insert(SessionUser::from(&user));
    Ok(next.run(request).await)
}

/// Resolve a cookie token to its user, if the session is live.
pub async fn authenticate(repo: &Repository, token: &str) -> Result<Option<User>, AppError> {
    let Some((session_id, secret)) = split_token(token) else {
        return Ok(None);
    };
    let Some(session) = repo.get_session(session_id).await? else {
        return Ok(None);
    };
    if !constant_time_compare(secret, &session.secret) {
        tracing::warn!("Session {} presented a wrong secret", session_id);
        return Ok(None);
    }
    repo.get_user(&session.user_id).await
}

/// Delete the session behind `token` if the secret matches.
pub async fn end_session(repo: &Repository, token: &str) -> Result<(), AppError> {
    let Some((session_id, secret)) = split_token(token) else {
        return Ok(());
    };
    if let Some(session) = repo.get_session(session_id).await? {
        if constant_time_compare(secret, &session.secret) {
            repo.delete_session(&session.id).await?;
        }
    }
    Ok(())
}

/// Cookie that hands `session` to the client.
pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.token()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie that clears the session on the client.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

fn not_authenticated() -> AppError {
    AppError::Unauthorized("Not authenticated".to_string())
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
