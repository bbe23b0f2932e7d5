//! Edit-rights lookup over `org_users`, `folders` and `folder_permissions`.

use libpanels_core::types::{DbId, GENERAL_FOLDER_ID};
use sqlx::PgPool;

/// Minimum `folder_permissions.permission` value that grants editing.
pub const PERMISSION_EDIT: i16 = 2;

/// Provides folder permission checks.
pub struct FolderPermissionRepo;

impl FolderPermissionRepo {
    /// Whether `user_id` may edit content in `folder_id` of `org_id`.
    ///
    /// The folder must be the General folder or belong to `org_id`. Then:
    /// - Org `Admin` may edit every folder of the org.
    /// - Org `Editor` may edit the General folder.
    /// - Otherwise an edit-level permission on the folder is required.
    pub async fn can_edit(
        pool: &PgPool,
        user_id: DbId,
        org_id: DbId,
        folder_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT ( \
                $3 = $4 OR EXISTS (SELECT 1 FROM folders WHERE id = $3 AND org_id = $2) \
             ) AND ( \
                EXISTS ( \
                    SELECT 1 FROM org_users ou \
                    WHERE ou.org_id = $2 AND ou.user_id = $1 \
                      AND (ou.role = 'Admin' OR ($3 = $4 AND ou.role = 'Editor')) \
                ) OR EXISTS ( \
                    SELECT 1 FROM folder_permissions fp \
                    WHERE fp.folder_id = $3 AND fp.user_id = $1 AND fp.permission >= $5 \
                ) \
             )",
        )
        .bind(user_id)
        .bind(org_id)
        .bind(folder_id)
        .bind(GENERAL_FOLDER_ID)
        .bind(PERMISSION_EDIT)
        .fetch_one(pool)
        .await
    }
}
