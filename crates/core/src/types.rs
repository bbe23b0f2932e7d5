/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A panel model document. Always a JSON object at the top level.
pub type PanelModel = serde_json::Map<String, serde_json::Value>;

/// Folder id of the org-root ("General") folder.
pub const GENERAL_FOLDER_ID: DbId = 0;
