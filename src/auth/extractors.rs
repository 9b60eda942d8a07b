use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;

use super::error::{AuthError, Missing};
use super::repo_types::User;
use crate::state::AppState;

/// The authenticated, existing user behind a request.
///
/// Extracting it runs the session boundary: bearer token → signature and
/// expiry check → one user lookup. The resolved user is also stored in the
/// request extensions, so later extractions in the same request reuse it.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let state = AppState::from_ref(state);
        let token = bearer_token(&parts.headers)?;

        let claims = state
            .jwt
            .verify(token)
            .map_err(|_| AuthError::InvalidCredential)?;

        let user = state
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(AuthError::StoreUnavailable)?
            .ok_or(AuthError::UnknownSubject)?;

        debug!(user_id = %user.id, "request authenticated");
        let current = CurrentUser(user);
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential(Missing::Header))?
        .to_str()
        .map_err(|_| AuthError::MissingCredential(Missing::Token))?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MissingCredential(Missing::Token))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingCredential(Missing::Token));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredential(Missing::Token));
    }
    Ok(token)
}
