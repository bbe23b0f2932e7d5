//! Row model for the `library_panels` table.

use libpanels_core::library_panel::LibraryPanel;
use libpanels_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `library_panels` table.
#[derive(Debug, Clone, FromRow)]
pub struct LibraryPanelRow {
    pub id: DbId,
    pub org_id: DbId,
    pub folder_id: DbId,
    pub uid: String,
    pub name: String,
    pub model: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: DbId,
    pub updated_by: DbId,
}

impl From<LibraryPanelRow> for LibraryPanel {
    fn from(row: LibraryPanelRow) -> Self {
        // The column is always written from a JSON object; anything else is
        // treated as an empty model.
        let model = match row.model {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        LibraryPanel {
            id: row.id,
            org_id: row.org_id,
            folder_id: row.folder_id,
            uid: row.uid,
            name: row.name,
            model,
            created_at: row.created_at,
            updated_at: row.updated_at,
            created_by: row.created_by,
            updated_by: row.updated_by,
        }
    }
}
