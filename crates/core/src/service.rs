//! Orchestration of library panel operations.
//!
//! Every public method runs: authorization, then the store, then the result
//! assembler. Errors are returned as-is; nothing is retried here.

use std::sync::Arc;

use crate::access::{FolderGuard, UserDirectory};
use crate::assemble::ResultAssembler;
use crate::connection::{
    validate_dashboard_id, ConnectOutcome, ConnectionStatus, ConnectionTracker,
    DisconnectOutcome, PanelConnection,
};
use crate::error::CoreError;
use crate::library_panel::{CreateLibraryPanel, LibraryPanel, PanelView, PatchLibraryPanel};
use crate::patch::{apply_patch, PanelPatch};
use crate::store::PanelStore;
use crate::types::DbId;

/// Entry point for all library panel operations.
///
/// Cheap to share behind an `Arc`; collaborators are injected trait objects.
pub struct LibraryPanelService {
    store: Arc<dyn PanelStore>,
    connections: Arc<dyn ConnectionTracker>,
    guard: Arc<dyn FolderGuard>,
    users: Arc<dyn UserDirectory>,
}

impl LibraryPanelService {
    pub fn new(
        store: Arc<dyn PanelStore>,
        connections: Arc<dyn ConnectionTracker>,
        guard: Arc<dyn FolderGuard>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            store,
            connections,
            guard,
            users,
        }
    }

    /// Create a panel in `input.folder_id`.
    pub async fn create_panel(
        &self,
        org_id: DbId,
        actor: DbId,
        input: CreateLibraryPanel,
    ) -> Result<PanelView, CoreError> {
        let new = input.validate()?;
        self.ensure_can_edit(actor, org_id, new.folder_id).await?;

        let panel = self.store.create(org_id, actor, &new).await?;
        tracing::info!(org_id, uid = %panel.uid, name = %panel.name, "Library panel created");
        self.assemble(&panel, actor).await
    }

    /// Read a panel. Panels of other orgs are reported as not found.
    pub async fn get_panel(
        &self,
        org_id: DbId,
        uid: &str,
        actor: DbId,
    ) -> Result<PanelView, CoreError> {
        let panel = self.find_panel(org_id, uid).await?;
        tracing::debug!(org_id, uid, "Library panel loaded");
        self.assemble(&panel, actor).await
    }

    /// Apply a partial update and return the resulting view.
    ///
    /// The actor needs edit rights on the panel's current folder and, when
    /// moving it, on the target folder. An empty patch is valid and only
    /// re-attributes `updated_by`/`updated_at`.
    pub async fn patch_panel(
        &self,
        org_id: DbId,
        uid: &str,
        actor: DbId,
        input: PatchLibraryPanel,
    ) -> Result<PanelView, CoreError> {
        let patch = PanelPatch::try_from(input)?;
        let existing = self.find_panel(org_id, uid).await?;
        self.ensure_can_edit(actor, org_id, existing.folder_id).await?;

        if let Some(&target) = patch.folder_id.as_set() {
            if target != existing.folder_id {
                self.ensure_can_edit(actor, org_id, target).await?;
            }
        }
        if patch.is_empty() {
            tracing::debug!(org_id, uid, actor, "Empty patch, only update metadata changes");
        }

        let checked_folder = existing.folder_id;
        let mutator = move |current: &LibraryPanel| {
            if current.folder_id != checked_folder {
                return Err(CoreError::Conflict(format!(
                    "Library panel {} was moved to another folder, retry the update",
                    current.uid
                )));
            }
            Ok(apply_patch(&current.content(), &patch))
        };

        let updated = self
            .store
            .update_atomic(org_id, uid, actor, &mutator)
            .await?;
        tracing::info!(
            org_id,
            uid,
            actor,
            folder_id = updated.folder_id,
            "Library panel patched"
        );
        self.assemble(&updated, actor).await
    }

    /// Delete a panel and all of its connections.
    pub async fn delete_panel(&self, org_id: DbId, uid: &str, actor: DbId) -> Result<(), CoreError> {
        let panel = self.find_panel(org_id, uid).await?;
        self.ensure_can_edit(actor, org_id, panel.folder_id).await?;

        if !self.store.delete(org_id, uid).await? {
            return Err(CoreError::panel_not_found(uid));
        }
        tracing::info!(org_id, uid, actor, "Library panel deleted");
        Ok(())
    }

    /// Connect a dashboard to a panel. Repeating the call is harmless.
    pub async fn connect_panel(
        &self,
        org_id: DbId,
        uid: &str,
        dashboard_id: DbId,
        actor: DbId,
    ) -> Result<ConnectionStatus<ConnectOutcome>, CoreError> {
        validate_dashboard_id(dashboard_id)?;
        let panel = self.find_panel(org_id, uid).await?;
        self.ensure_can_edit(actor, org_id, panel.folder_id).await?;

        let outcome = self
            .connections
            .connect(panel.id, dashboard_id, actor)
            .await?;
        let connected_dashboards = self.connections.count_connections(panel.id).await?;
        tracing::info!(org_id, uid, dashboard_id, ?outcome, "Library panel connected");

        Ok(ConnectionStatus {
            panel_uid: panel.uid,
            dashboard_id,
            outcome,
            connected_dashboards,
        })
    }

    /// Remove a dashboard connection. Removing a missing edge is not an error.
    pub async fn disconnect_panel(
        &self,
        org_id: DbId,
        uid: &str,
        dashboard_id: DbId,
        actor: DbId,
    ) -> Result<ConnectionStatus<DisconnectOutcome>, CoreError> {
        validate_dashboard_id(dashboard_id)?;
        let panel = self.find_panel(org_id, uid).await?;
        self.ensure_can_edit(actor, org_id, panel.folder_id).await?;

        let outcome = if self.connections.disconnect(panel.id, dashboard_id).await? {
            DisconnectOutcome::Disconnected
        } else {
            DisconnectOutcome::NotConnected
        };
        let connected_dashboards = self.connections.count_connections(panel.id).await?;
        tracing::info!(org_id, uid, dashboard_id, ?outcome, "Library panel disconnected");

        Ok(ConnectionStatus {
            panel_uid: panel.uid,
            dashboard_id,
            outcome,
            connected_dashboards,
        })
    }

    /// List the dashboards connected to a panel.
    pub async fn list_connections(
        &self,
        org_id: DbId,
        uid: &str,
    ) -> Result<Vec<PanelConnection>, CoreError> {
        let panel = self.find_panel(org_id, uid).await?;
        self.connections.list_connections(panel.id).await
    }

    /// Probe the backing store.
    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.store.health_check().await
    }

    async fn find_panel(&self, org_id: DbId, uid: &str) -> Result<LibraryPanel, CoreError> {
        self.store
            .get(org_id, uid)
            .await?
            .ok_or_else(|| CoreError::panel_not_found(uid))
    }

    async fn ensure_can_edit(
        &self,
        actor: DbId,
        org_id: DbId,
        folder_id: DbId,
    ) -> Result<(), CoreError> {
        if self.guard.can_edit(actor, org_id, folder_id).await? {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "No permission to edit library panels in folder {folder_id}"
            )))
        }
    }

    async fn assemble(&self, panel: &LibraryPanel, viewer: DbId) -> Result<PanelView, CoreError> {
        ResultAssembler {
            guard: self.guard.as_ref(),
            users: self.users.as_ref(),
            connections: self.connections.as_ref(),
        }
        .assemble(panel, viewer)
        .await
    }
}
