use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::{models::{Role, User}, names, rejections::AppError, AppState};

/// Guard extractor that resolves the user-session cookie to the logged-in
/// user. Rejects to the login screen when the cookie is missing or stale.
pub struct AuthGuard(pub User);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(names::USER_SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthorized)?;

        let username = state
            .auth
            .username_for(&token)
            .ok_or(AppError::Unauthorized)?;

        let user = state
            .store
            .find_user(&username)
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthGuard(user))
    }
}

/// Like [`AuthGuard`], but only admits administrators.
pub struct AdminGuard(pub User);

impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthGuard(user) = AuthGuard::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Unauthorized);
        }
        Ok(AdminGuard(user))
    }
}

/// The raw session token, for logout.
pub struct SessionToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(names::USER_SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string());
        Ok(SessionToken(token))
    }
}
