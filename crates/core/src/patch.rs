//! Partial-update merge engine for library panels.
//!
//! A patch names only the fields it wants to change. Each field is an
//! explicit [`PatchField`] so "leave as is" can never collide with a real
//! value. The legacy wire encoding (`folder_id = -1`, `name = ""`, empty
//! model) is normalized into [`PatchField::Unchanged`] at the boundary by
//! [`PanelPatch::from_wire`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, PanelModel};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Wire sentinel meaning "do not change the folder".
pub const FOLDER_UNCHANGED: DbId = -1;

/// Maximum length (in characters) of a panel name.
pub const MAX_NAME_LEN: usize = 150;

/// Model key kept in sync with the panel name.
pub const TITLE_KEY: &str = "title";

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// A single field of a partial update: either left alone or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PatchField<T> {
    #[default]
    Unchanged,
    Set(T),
}

impl<T> PatchField<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, PatchField::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            PatchField::Set(value) => Some(value),
            PatchField::Unchanged => None,
        }
    }
}

/// The mergeable part of a library panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelContent {
    pub folder_id: DbId,
    pub name: String,
    pub model: PanelModel,
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelPatch {
    pub folder_id: PatchField<DbId>,
    pub name: PatchField<String>,
    pub model: PatchField<PanelModel>,
}

impl PanelPatch {
    /// Build a patch from the wire encoding, normalizing the legacy
    /// "unchanged" sentinels and validating whatever is left.
    pub fn from_wire(
        folder_id: Option<DbId>,
        name: Option<String>,
        model: Option<serde_json::Value>,
    ) -> Result<Self, CoreError> {
        let folder_id = match folder_id {
            None | Some(FOLDER_UNCHANGED) => PatchField::Unchanged,
            Some(id) if id < 0 => {
                return Err(CoreError::Validation(format!(
                    "Invalid folder id: {id}"
                )))
            }
            Some(id) => PatchField::Set(id),
        };

        let name = match name {
            None => PatchField::Unchanged,
            Some(n) if n.is_empty() => PatchField::Unchanged,
            Some(n) => {
                validate_name(&n)?;
                PatchField::Set(n)
            }
        };

        let model = match model {
            None => PatchField::Unchanged,
            Some(value) => match parse_model(value)? {
                Some(m) if !m.is_empty() => PatchField::Set(m),
                _ => PatchField::Unchanged,
            },
        };

        Ok(Self {
            folder_id,
            name,
            model,
        })
    }

    /// `true` when the patch changes no content at all.
    pub fn is_empty(&self) -> bool {
        !self.folder_id.is_set() && !self.name.is_set() && !self.model.is_set()
    }
}

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Validate a panel name.
///
/// Rules:
/// - Not blank (whitespace-only counts as blank)
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Library panel name must not be empty".to_string(),
        ));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Library panel name is too long: {len} characters (max {MAX_NAME_LEN})"
        )));
    }
    Ok(())
}

/// Interpret a JSON value as a panel model.
///
/// `null` yields `None`; anything other than an object is rejected.
pub fn parse_model(value: serde_json::Value) -> Result<Option<PanelModel>, CoreError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) => Ok(Some(map)),
        _ => Err(CoreError::Validation(
            "Library panel model must be a JSON object".to_string(),
        )),
    }
}

/// Set the model's title to the given name.
pub fn sync_title(model: &mut PanelModel, name: &str) {
    model.insert(
        TITLE_KEY.to_string(),
        serde_json::Value::String(name.to_string()),
    );
}

/// Give the model a title if it has none.
pub fn ensure_title(model: &mut PanelModel, name: &str) {
    if !model.contains_key(TITLE_KEY) {
        sync_title(model, name);
    }
}

/* --------------------------------------------------------------------------
Merge
-------------------------------------------------------------------------- */

/// Apply a patch to the current content, returning the desired new content.
///
/// Order matters: folder, then name (which rewrites `model.title`), then a
/// wholesale model replacement. A replacement model that carries its own
/// title keeps it; one without a title inherits the resulting name.
pub fn apply_patch(current: &PanelContent, patch: &PanelPatch) -> PanelContent {
    let mut next = current.clone();

    if let PatchField::Set(folder_id) = patch.folder_id {
        next.folder_id = folder_id;
    }

    if let PatchField::Set(name) = &patch.name {
        next.name = name.clone();
        sync_title(&mut next.model, name);
    }

    if let PatchField::Set(model) = &patch.model {
        next.model = model.clone();
        ensure_title(&mut next.model, &next.name);
    }

    next
}
