//! Repository for the `library_panel_connections` table.

use libpanels_core::types::DbId;
use sqlx::PgPool;

use crate::models::panel_connection::PanelConnectionRow;

const COLUMNS: &str = "id, panel_id, dashboard_id, connected_by, connected_at";

/// Provides queries for panel-to-dashboard connections.
pub struct PanelConnectionRepo;

impl PanelConnectionRepo {
    /// Insert a connection. Returns `None` when the edge already exists.
    pub async fn connect(
        pool: &PgPool,
        panel_id: DbId,
        dashboard_id: DbId,
        connected_by: DbId,
    ) -> Result<Option<PanelConnectionRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO library_panel_connections (panel_id, dashboard_id, connected_by) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (panel_id, dashboard_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PanelConnectionRow>(&query)
            .bind(panel_id)
            .bind(dashboard_id)
            .bind(connected_by)
            .fetch_optional(pool)
            .await
    }

    /// Remove a connection. Returns `true` if a row was removed.
    pub async fn disconnect(
        pool: &PgPool,
        panel_id: DbId,
        dashboard_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM library_panel_connections WHERE panel_id = $1 AND dashboard_id = $2",
        )
        .bind(panel_id)
        .bind(dashboard_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of dashboards connected to a panel.
    pub async fn count_by_panel(pool: &PgPool, panel_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM library_panel_connections WHERE panel_id = $1",
        )
        .bind(panel_id)
        .fetch_one(pool)
        .await
    }

    /// All connections of a panel, ordered by dashboard id.
    pub async fn list_by_panel(
        pool: &PgPool,
        panel_id: DbId,
    ) -> Result<Vec<PanelConnectionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM library_panel_connections \
             WHERE panel_id = $1 \
             ORDER BY dashboard_id ASC"
        );
        sqlx::query_as::<_, PanelConnectionRow>(&query)
            .bind(panel_id)
            .fetch_all(pool)
            .await
    }
}
