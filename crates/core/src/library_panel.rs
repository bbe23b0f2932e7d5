//! Library panel model, request DTOs and the denormalized response view.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::patch::{self, PanelContent, PanelPatch};
use crate::types::{DbId, PanelModel, Timestamp};

/// Maximum length of a caller-supplied uid.
pub const MAX_UID_LEN: usize = 40;

/* --------------------------------------------------------------------------
Stored record
-------------------------------------------------------------------------- */

/// A library panel as persisted by a [`crate::store::PanelStore`].
///
/// Creator/updater names, avatars, edit rights and the connection count are
/// not part of the record; they are computed when a [`PanelView`] is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryPanel {
    pub id: DbId,
    pub org_id: DbId,
    pub folder_id: DbId,
    pub uid: String,
    pub name: String,
    pub model: PanelModel,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: DbId,
    pub updated_by: DbId,
}

impl LibraryPanel {
    pub fn content(&self) -> PanelContent {
        PanelContent {
            folder_id: self.folder_id,
            name: self.name.clone(),
            model: self.model.clone(),
        }
    }
}

/// A validated create command, ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLibraryPanel {
    pub uid: String,
    pub folder_id: DbId,
    pub name: String,
    pub model: PanelModel,
}

/* --------------------------------------------------------------------------
Request DTOs
-------------------------------------------------------------------------- */

/// Request body for creating a library panel.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLibraryPanel {
    pub folder_id: DbId,
    pub name: String,
    pub model: serde_json::Value,
    pub uid: Option<String>,
}

impl CreateLibraryPanel {
    /// Validate the request and fill in defaults (generated uid, model title).
    pub fn validate(self) -> Result<NewLibraryPanel, CoreError> {
        if self.folder_id < 0 {
            return Err(CoreError::Validation(format!(
                "Invalid folder id: {}",
                self.folder_id
            )));
        }
        patch::validate_name(&self.name)?;

        let uid = match self.uid {
            Some(uid) => {
                validate_uid(&uid)?;
                uid
            }
            None => generate_uid(),
        };

        let mut model = patch::parse_model(self.model)?.unwrap_or_default();
        patch::ensure_title(&mut model, &self.name);

        Ok(NewLibraryPanel {
            uid,
            folder_id: self.folder_id,
            name: self.name,
            model,
        })
    }
}

/// Request body for patching a library panel. Every field is optional.
///
/// `folder_id = -1`, `name = ""` and an empty/null `model` are accepted as
/// "unchanged" for compatibility with older clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchLibraryPanel {
    pub folder_id: Option<DbId>,
    pub name: Option<String>,
    pub model: Option<serde_json::Value>,
}

impl TryFrom<PatchLibraryPanel> for PanelPatch {
    type Error = CoreError;

    fn try_from(input: PatchLibraryPanel) -> Result<Self, Self::Error> {
        PanelPatch::from_wire(input.folder_id, input.name, input.model)
    }
}

/* --------------------------------------------------------------------------
Response view
-------------------------------------------------------------------------- */

/// A user as shown in panel metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: DbId,
    pub name: String,
    pub avatar_url: String,
}

/// Computed metadata attached to every [`PanelView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelMeta {
    pub can_edit: bool,
    pub connected_dashboards: i64,
    pub created: Timestamp,
    pub updated: Timestamp,
    pub created_by: UserRef,
    pub updated_by: UserRef,
}

/// Fully denormalized library panel returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub id: DbId,
    pub org_id: DbId,
    pub folder_id: DbId,
    pub uid: String,
    pub name: String,
    pub model: PanelModel,
    pub meta: PanelMeta,
}

/* --------------------------------------------------------------------------
Uid helpers
-------------------------------------------------------------------------- */

/// Generate a fresh panel uid.
pub fn generate_uid() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Validate a caller-supplied uid: 1..=[`MAX_UID_LEN`] chars of `[A-Za-z0-9_-]`.
pub fn validate_uid(uid: &str) -> Result<(), CoreError> {
    if uid.is_empty() || uid.len() > MAX_UID_LEN {
        return Err(CoreError::Validation(format!(
            "Library panel uid must be 1 to {MAX_UID_LEN} characters"
        )));
    }
    if !uid
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(format!(
            "Library panel uid contains invalid characters: {uid}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_fills_uid_and_title() {
        let new = CreateLibraryPanel {
            folder_id: 1,
            name: "Text - Library Panel".into(),
            model: json!({"type": "text"}),
            uid: None,
        }
        .validate()
        .unwrap();
        assert_eq!(new.uid.len(), 32);
        assert_eq!(new.model["title"], "Text - Library Panel");
    }

    #[test]
    fn create_rejects_bad_uid() {
        let err = CreateLibraryPanel {
            folder_id: 1,
            name: "Panel".into(),
            model: json!({}),
            uid: Some("has space".into()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn create_rejects_non_object_model() {
        let result = CreateLibraryPanel {
            folder_id: 0,
            name: "Panel".into(),
            model: json!(42),
            uid: None,
        }
        .validate();
        assert!(result.is_err());
    }

    #[test]
    fn generated_uids_are_distinct() {
        assert_ne!(generate_uid(), generate_uid());
        assert!(validate_uid(&generate_uid()).is_ok());
    }
}
