//! Folder guard and user directory backed by PostgreSQL.

use async_trait::async_trait;
use libpanels_core::access::{FolderGuard, UserDirectory, UserProfile};
use libpanels_core::error::CoreError;
use libpanels_core::types::DbId;

use crate::error::internal;
use crate::repositories::{FolderPermissionRepo, UserRepo};
use crate::DbPool;

/// Folder guard driven by org roles and folder permissions.
#[derive(Clone)]
pub struct PgFolderGuard {
    pool: DbPool,
}

impl PgFolderGuard {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderGuard for PgFolderGuard {
    async fn can_edit(
        &self,
        user_id: DbId,
        org_id: DbId,
        folder_id: DbId,
    ) -> Result<bool, CoreError> {
        FolderPermissionRepo::can_edit(&self.pool, user_id, org_id, folder_id)
            .await
            .map_err(internal)
    }
}

/// User directory reading the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn resolve(&self, user_id: DbId) -> Result<Option<UserProfile>, CoreError> {
        let user = UserRepo::find_by_id(&self.pool, user_id)
            .await
            .map_err(internal)?;
        Ok(user.map(|u| u.profile()))
    }
}
