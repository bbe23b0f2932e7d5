//! Builds [`PanelView`]s from stored records plus computed metadata.
//!
//! Creator and updater profiles are resolved on every read, so a changed
//! display name shows up without rewriting any panel. Nothing here writes.

use crate::access::{FolderGuard, UserDirectory, UserProfile};
use crate::avatar::avatar_url;
use crate::connection::ConnectionTracker;
use crate::error::CoreError;
use crate::library_panel::{LibraryPanel, PanelMeta, PanelView, UserRef};
use crate::types::DbId;

/// Borrowed collaborators needed to denormalize a panel.
pub struct ResultAssembler<'a> {
    pub guard: &'a dyn FolderGuard,
    pub users: &'a dyn UserDirectory,
    pub connections: &'a dyn ConnectionTracker,
}

impl ResultAssembler<'_> {
    /// Build the view of `panel` as seen by `viewer`.
    pub async fn assemble(
        &self,
        panel: &LibraryPanel,
        viewer: DbId,
    ) -> Result<PanelView, CoreError> {
        let (can_edit, connected, created_by, updated_by) = tokio::try_join!(
            self.guard.can_edit(viewer, panel.org_id, panel.folder_id),
            self.connections.count_connections(panel.id),
            self.users.resolve(panel.created_by),
            self.users.resolve(panel.updated_by),
        )?;

        Ok(build_view(
            panel,
            can_edit,
            connected,
            user_ref(panel.created_by, created_by),
            user_ref(panel.updated_by, updated_by),
        ))
    }
}

/// Turn a resolved (or unresolved) profile into a [`UserRef`].
///
/// Unknown users get an empty name and an avatar derived from their id.
pub fn user_ref(id: DbId, profile: Option<UserProfile>) -> UserRef {
    match profile {
        Some(profile) => UserRef {
            id,
            name: profile.name,
            avatar_url: profile.avatar_url,
        },
        None => UserRef {
            id,
            name: String::new(),
            avatar_url: avatar_url(&id.to_string()),
        },
    }
}

pub fn build_view(
    panel: &LibraryPanel,
    can_edit: bool,
    connected_dashboards: i64,
    created_by: UserRef,
    updated_by: UserRef,
) -> PanelView {
    PanelView {
        id: panel.id,
        org_id: panel.org_id,
        folder_id: panel.folder_id,
        uid: panel.uid.clone(),
        name: panel.name.clone(),
        model: panel.model.clone(),
        meta: PanelMeta {
            can_edit,
            connected_dashboards,
            created: panel.created_at,
            updated: panel.updated_at,
            created_by,
            updated_by,
        },
    }
}
