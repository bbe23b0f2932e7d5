//! Translation of sqlx errors into domain errors.

use libpanels_core::error::CoreError;

/// Unique index guarding `(org_id, folder_id, name)`.
pub const UQ_PANEL_NAME: &str = "uq_library_panels_org_folder_name";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Classify a sqlx error into a [`CoreError`].
///
/// - Unique violation on [`UQ_PANEL_NAME`] -> `NameTaken` (`name` is the attempted name).
/// - Unique violation on any other `uq_` constraint (e.g. a duplicate uid) -> `Conflict`.
/// - Foreign key violation -> `NotFound` for `entity`.
/// - Everything else -> `Internal`, with the detail logged rather than returned.
pub fn map_sqlx_error(err: sqlx::Error, entity: &'static str, name: &str) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == UQ_PANEL_NAME {
                    return CoreError::NameTaken(name.to_string());
                }
                if constraint.starts_with("uq_") {
                    return CoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return CoreError::NotFound {
                    entity,
                    id: name.to_string(),
                };
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal("database operation failed".to_string())
}

/// Map a sqlx error that carries no domain meaning.
pub fn internal(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Internal("database operation failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_internal() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, "LibraryPanel", "x");
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn internal_does_not_leak_detail() {
        let err = internal(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "Internal error: database operation failed");
    }
}
