use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, password, Claims};
use crate::database;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub nama: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register - Create a new user account
///
/// Hashes the password and inserts the user row. Insert failures
/// (including a duplicate email) are reported with a single generic
/// message; nothing about the cause is surfaced to the caller.
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<Value> {
    let RegisterRequest { nama, email, password } = payload;

    // bcrypt is deliberately slow, keep it off the request executor
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            ApiError::internal_server_error("Error hashing password")
        })??;

    database::users::insert_user(&nama, &email, &password_hash)
        .await
        .map_err(|e| {
            tracing::error!("User insert failed: {}", e);
            ApiError::internal_server_error("Registration failed")
        })?;

    Ok(ApiResponse::created(json!({
        "message": "User registered successfully"
    })))
}

/// POST /auth/login - Authenticate and receive a session token
///
/// An unknown email and a bad password are reported separately, matching
/// the client's expectations. A comparison failure counts as a bad
/// password rather than a server error.
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<Value> {
    let user = database::users::find_user_by_email(&payload.email)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {}", e);
            ApiError::internal_server_error("Login failed")
        })?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    let supplied = payload.password;
    let stored_hash = user.password.clone();
    let matches = tokio::task::spawn_blocking(move || {
        password::verify_password(&supplied, &stored_hash)
    })
    .await;

    let is_match = matches.ok().and_then(|r| r.ok()).unwrap_or(false);
    if !is_match {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = generate_jwt(Claims::new(user.id, user.email.clone()))?;

    Ok(ApiResponse::success(json!({
        "message": "Login successfully",
        "token": token
    })))
}
