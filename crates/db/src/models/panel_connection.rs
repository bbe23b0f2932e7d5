//! Row model for the `library_panel_connections` table.

use libpanels_core::connection::PanelConnection;
use libpanels_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `library_panel_connections` table.
#[derive(Debug, Clone, FromRow)]
pub struct PanelConnectionRow {
    pub id: DbId,
    pub panel_id: DbId,
    pub dashboard_id: DbId,
    pub connected_by: DbId,
    pub connected_at: Timestamp,
}

impl From<PanelConnectionRow> for PanelConnection {
    fn from(row: PanelConnectionRow) -> Self {
        PanelConnection {
            panel_id: row.panel_id,
            dashboard_id: row.dashboard_id,
            connected_by: row.connected_by,
            connected_at: row.connected_at,
        }
    }
}
