#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Another panel in the same org and folder already uses this name.
    #[error("A library panel named '{0}' already exists in this folder")]
    NameTaken(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing library panel addressed by uid.
    pub fn panel_not_found(uid: &str) -> Self {
        CoreError::NotFound {
            entity: "LibraryPanel",
            id: uid.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_not_found_display() {
        let err = CoreError::panel_not_found("abc");
        assert_eq!(
            err.to_string(),
            "Entity not found: LibraryPanel with id abc"
        );
    }

    #[test]
    fn name_taken_display() {
        let err = CoreError::NameTaken("Text".into());
        assert_eq!(
            err.to_string(),
            "A library panel named 'Text' already exists in this folder"
        );
    }
}
