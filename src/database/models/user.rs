use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row, including the stored password hash. Never serialized to
/// clients; listings use [`UserSummary`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub nama: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Client-facing projection of a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub nama: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
