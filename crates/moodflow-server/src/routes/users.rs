use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use moodflow_core::auth::{hash_password, validate_password, verify_password};
use moodflow_core::storage::{NewUser, ProfileUpdate, SqliteStore, User, UserProfile, UserSummary};

use crate::error::{ApiError, ApiResult};
use crate::extract::{parse_id, present, AuthUser};
use crate::response::Envelope;
use crate::state::{blocking, AppState};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    username: Option<String>,
    email: Option<String>,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct Session {
    id: Uuid,
    username: String,
    email: String,
    token: String,
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterBody>, JsonRejection>,
) -> ApiResult<Envelope<Session>> {
    let Json(body) = payload?;
    let (Some(username), Some(email), Some(password)) = (
        present(body.username),
        present(body.email),
        body.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::bad_request(
            "Missing required fields: username, email, password",
        ));
    };
    validate_password(&password)?;

    let new_user = NewUser {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password_hash: blocking(move || hash_password(&password)).await?,
    };
    let user = state
        .with_store(move |store| store.create_user(&new_user))
        .await?;
    let token = state.tokens.issue(user.id, &user.username)?;

    Ok(Envelope::created(Session {
        id: user.id,
        username: user.username,
        email: user.email,
        token,
    })
    .message("User registered successfully"))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginBody>, JsonRejection>,
) -> ApiResult<Envelope<Session>> {
    let Json(body) = payload?;
    let (Some(username), Some(password)) = (
        present(body.username),
        body.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::bad_request(
            "Missing required fields: username, password",
        ));
    };

    let user = state
        .with_store(move |store| check_credentials(store, username.trim(), &password))
        .await?;

    let token = state.tokens.issue(user.id, &user.username)?;
    tracing::info!(user_id = %user.id, "login");
    Ok(Envelope::data(Session {
        id: user.id,
        username: user.username,
        email: user.email,
        token,
    })
    .message("Login successful"))
}

/// Looks up the account and verifies the password; both failures look the same.
fn check_credentials(store: &SqliteStore, username: &str, password: &str) -> ApiResult<User> {
    let user = store
        .find_user_by_username(username)?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;
    if !verify_password(password, &user.password_hash)? {
        tracing::debug!(username = %user.username, "password mismatch");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }
    Ok(user)
}

/// Profile of the account the bearer token was issued to.
pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Envelope<UserProfile>> {
    let user_id = claims.sub;
    let profile = state
        .with_store(move |store| store.user_profile(&user_id))
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(Envelope::data(profile))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Envelope<UserProfile>> {
    let user_id = parse_id(&user_id, "user id")?;
    let profile = state
        .with_store(move |store| store.user_profile(&user_id))
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;
    Ok(Envelope::data(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<ProfileBody>, JsonRejection>,
) -> ApiResult<Envelope> {
    let user_id = parse_id(&user_id, "user id")?;
    let Json(body) = payload?;
    let (Some(username), Some(email)) = (present(body.username), present(body.email)) else {
        return Err(ApiError::bad_request(
            "Missing required fields: username, email",
        ));
    };

    let update = ProfileUpdate {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
    };
    let changes = state
        .with_store(move |store| store.update_profile(&user_id, &update))
        .await?;
    if changes == 0 {
        return Err(ApiError::not_found(USER_NOT_FOUND));
    }
    Ok(Envelope::ok().message("Profile updated successfully"))
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Envelope<Vec<UserSummary>>> {
    let users = state.with_store(|store| store.list_users()).await?;
    let count = users.len();
    Ok(Envelope::data(users).count(count))
}
