use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::db::StoreError;
use crate::error::ErrorBody;

/// Why the session boundary turned a request away.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing {0}")]
    MissingCredential(Missing),

    #[error("invalid or expired token")]
    InvalidCredential,

    #[error("user not found")]
    UnknownSubject,

    #[error("user store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Which part of the credential was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Header,
    Token,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Header => f.write_str("authorization header"),
            Missing::Token => f.write_str("bearer token"),
        }
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential(_)
            | AuthError::InvalidCredential
            | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AuthError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential(Missing::Header) => "No Authorization header found",
            AuthError::MissingCredential(Missing::Token) => "No token found in Authorization header",
            AuthError::InvalidCredential => "Invalid token",
            AuthError::UnknownSubject => "User not found",
            AuthError::StoreUnavailable(_) => "Server error during authentication",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::StoreUnavailable(e) => error!(error = %e, "auth lookup failed"),
            _ => warn!(reason = %self, "request rejected"),
        }
        (self.status_code(), Json(ErrorBody::new(self.client_message()))).into_response()
    }
}
