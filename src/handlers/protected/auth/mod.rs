use axum::extract::Extension;

use crate::database;
use crate::database::models::user::UserSummary;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /auth/users - List all registered users
///
/// Password hashes never leave the database layer; the projection holds
/// id, nama, email and created_at only.
pub async fn users_get(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Vec<UserSummary>> {
    tracing::debug!(requested_by = %auth_user.email, "listing users");

    let users = database::users::list_users().await.map_err(|e| {
        tracing::error!("Failed to list users: {}", e);
        ApiError::internal_server_error("Error retrieving users")
    })?;

    Ok(ApiResponse::success(users))
}
