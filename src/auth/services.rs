use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::{
    dto::{AuthResponse, LoginRequest, RegisterRequest},
    password::{hash_password, verify_password},
    repo_types::{NewUser, User},
};
use crate::db::StoreError;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;
const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=32;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    Ok(email)
}

pub async fn register(state: &AppState, payload: RegisterRequest) -> AppResult<AuthResponse> {
    let email = normalize_email(&payload.email)?;

    let username = payload.username.trim().to_string();
    if !USERNAME_LEN.contains(&username.chars().count()) {
        warn!("username length out of range");
        return Err(AppError::Validation(
            "Username must be between 3 and 32 characters".into(),
        ));
    }

    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }

    let password_hash = hash_password(payload.password).await?;

    let user = state
        .users
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(field) => {
                warn!(field, "registration conflict");
                AppError::Conflict("User already exists".into())
            }
            other => other.into(),
        })?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    issue_session(state, user)
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<AuthResponse> {
    let email = normalize_email(&payload.email)?;

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(payload.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    info!(user_id = %user.id, "user logged in");
    issue_session(state, user)
}

fn issue_session(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let token = state.jwt.sign(user.id)?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}
