//! Repository for the `library_panels` table.

use libpanels_core::library_panel::NewLibraryPanel;
use libpanels_core::patch::PanelContent;
use libpanels_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::library_panel::LibraryPanelRow;

const COLUMNS: &str = "id, org_id, folder_id, uid, name, model, \
     created_at, updated_at, created_by, updated_by";

/// Provides queries for library panels.
pub struct LibraryPanelRepo;

impl LibraryPanelRepo {
    /// Insert a new library panel, returning the created row.
    pub async fn create(
        pool: &PgPool,
        org_id: DbId,
        actor: DbId,
        input: &NewLibraryPanel,
    ) -> Result<LibraryPanelRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO library_panels \
                (org_id, folder_id, uid, name, model, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LibraryPanelRow>(&query)
            .bind(org_id)
            .bind(input.folder_id)
            .bind(&input.uid)
            .bind(&input.name)
            .bind(Json(&input.model))
            .bind(actor)
            .fetch_one(pool)
            .await
    }

    /// Find a library panel by uid within an org.
    pub async fn find_by_uid(
        pool: &PgPool,
        org_id: DbId,
        uid: &str,
    ) -> Result<Option<LibraryPanelRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM library_panels WHERE org_id = $1 AND uid = $2");
        sqlx::query_as::<_, LibraryPanelRow>(&query)
            .bind(org_id)
            .bind(uid)
            .fetch_optional(pool)
            .await
    }

    /// Find and row-lock a library panel for the rest of the transaction.
    pub async fn find_by_uid_for_update(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        org_id: DbId,
        uid: &str,
    ) -> Result<Option<LibraryPanelRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM library_panels \
             WHERE org_id = $1 AND uid = $2 \
             FOR UPDATE"
        );
        sqlx::query_as::<_, LibraryPanelRow>(&query)
            .bind(org_id)
            .bind(uid)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Whether another panel (not `exclude_uid`) already uses `name` in the folder.
    pub async fn name_exists(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        org_id: DbId,
        folder_id: DbId,
        name: &str,
        exclude_uid: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS ( \
                SELECT 1 FROM library_panels \
                WHERE org_id = $1 AND folder_id = $2 AND name = $3 AND uid <> $4 \
             )",
        )
        .bind(org_id)
        .bind(folder_id)
        .bind(name)
        .bind(exclude_uid)
        .fetch_one(&mut **tx)
        .await
    }

    /// Overwrite the content of a panel and stamp it as updated by `actor`.
    pub async fn update_content(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        content: &PanelContent,
        actor: DbId,
    ) -> Result<LibraryPanelRow, sqlx::Error> {
        let query = format!(
            "UPDATE library_panels SET \
                folder_id = $2, \
                name = $3, \
                model = $4, \
                updated_by = $5, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LibraryPanelRow>(&query)
            .bind(id)
            .bind(content.folder_id)
            .bind(&content.name)
            .bind(Json(&content.model))
            .bind(actor)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete a library panel. Connection rows go with it (`ON DELETE CASCADE`).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, org_id: DbId, uid: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM library_panels WHERE org_id = $1 AND uid = $2")
            .bind(org_id)
            .bind(uid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
