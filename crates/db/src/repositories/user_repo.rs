//! Read access to the `users` table.

use libpanels_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::UserRow;

/// Provides user lookups.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>("SELECT id, login, email, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
