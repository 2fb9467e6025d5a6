use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::{User, UserSummary};

/// Insert a new user row. The unique index on `email` makes duplicate
/// registrations fail here.
pub async fn insert_user(nama: &str, email: &str, password_hash: &str) -> Result<(), DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    sqlx::query("INSERT INTO users (nama, email, password) VALUES ($1, $2, $3)")
        .bind(nama)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(())
}

/// Look up a user by email for login
pub async fn find_user_by_email(email: &str) -> Result<Option<User>, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, nama, email, password, created_at
         FROM users
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// List all registered users without their password hashes
pub async fn list_users() -> Result<Vec<UserSummary>, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let users =
        sqlx::query_as::<_, UserSummary>("SELECT id, nama, email, created_at FROM users")
            .fetch_all(pool)
            .await?;

    Ok(users)
}
