//! In-process implementations of the collaborator traits.
//!
//! [`InMemoryPanelStore`] keeps panels and connection edges behind a single
//! `RwLock`; holding the write lock for the whole load-merge-check-write
//! sequence is what makes `update_atomic` atomic. Used by tests and for
//! running the API without PostgreSQL.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::access::{FolderGuard, UserDirectory, UserProfile};
use crate::avatar::avatar_url;
use crate::connection::{ConnectOutcome, ConnectionTracker, PanelConnection};
use crate::error::CoreError;
use crate::library_panel::{LibraryPanel, NewLibraryPanel};
use crate::store::{PanelMutator, PanelStore};
use crate::types::DbId;

/* --------------------------------------------------------------------------
InMemoryPanelStore
-------------------------------------------------------------------------- */

#[derive(Default)]
struct MemoryState {
    next_id: DbId,
    /// Keyed by `(org_id, uid)`.
    panels: HashMap<(DbId, String), LibraryPanel>,
    /// Keyed by `(panel_id, dashboard_id)`.
    connections: BTreeMap<(DbId, DbId), PanelConnection>,
}

impl MemoryState {
    fn name_taken(
        &self,
        org_id: DbId,
        folder_id: DbId,
        name: &str,
        exclude_uid: Option<&str>,
    ) -> bool {
        self.panels.values().any(|p| {
            p.org_id == org_id
                && p.folder_id == folder_id
                && p.name == name
                && Some(p.uid.as_str()) != exclude_uid
        })
    }

    fn panel_exists(&self, panel_id: DbId) -> bool {
        self.panels.values().any(|p| p.id == panel_id)
    }
}

/// Panel store and connection tracker backed by process memory.
#[derive(Default)]
pub struct InMemoryPanelStore {
    state: RwLock<MemoryState>,
}

impl InMemoryPanelStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PanelStore for InMemoryPanelStore {
    async fn create(
        &self,
        org_id: DbId,
        actor: DbId,
        input: &NewLibraryPanel,
    ) -> Result<LibraryPanel, CoreError> {
        let mut state = self.state.write().await;

        if state.panels.contains_key(&(org_id, input.uid.clone())) {
            return Err(CoreError::Conflict(format!(
                "A library panel with uid {} already exists",
                input.uid
            )));
        }
        if state.name_taken(org_id, input.folder_id, &input.name, None) {
            return Err(CoreError::NameTaken(input.name.clone()));
        }

        state.next_id += 1;
        let now = chrono::Utc::now();
        let panel = LibraryPanel {
            id: state.next_id,
            org_id,
            folder_id: input.folder_id,
            uid: input.uid.clone(),
            name: input.name.clone(),
            model: input.model.clone(),
            created_at: now,
            updated_at: now,
            created_by: actor,
            updated_by: actor,
        };
        state
            .panels
            .insert((org_id, panel.uid.clone()), panel.clone());
        Ok(panel)
    }

    async fn get(&self, org_id: DbId, uid: &str) -> Result<Option<LibraryPanel>, CoreError> {
        let state = self.state.read().await;
        Ok(state.panels.get(&(org_id, uid.to_string())).cloned())
    }

    async fn update_atomic(
        &self,
        org_id: DbId,
        uid: &str,
        actor: DbId,
        mutator: PanelMutator<'_>,
    ) -> Result<LibraryPanel, CoreError> {
        let mut state = self.state.write().await;
        let key = (org_id, uid.to_string());

        let current = state
            .panels
            .get(&key)
            .cloned()
            .ok_or_else(|| CoreError::panel_not_found(uid))?;
        let next = mutator(&current)?;

        if state.name_taken(org_id, next.folder_id, &next.name, Some(uid)) {
            return Err(CoreError::NameTaken(next.name));
        }

        let updated = LibraryPanel {
            folder_id: next.folder_id,
            name: next.name,
            model: next.model,
            updated_at: chrono::Utc::now(),
            updated_by: actor,
            ..current
        };
        state.panels.insert(key, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, org_id: DbId, uid: &str) -> Result<bool, CoreError> {
        let mut state = self.state.write().await;
        match state.panels.remove(&(org_id, uid.to_string())) {
            Some(panel) => {
                state.connections.retain(|(panel_id, _), _| *panel_id != panel.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[async_trait]
impl ConnectionTracker for InMemoryPanelStore {
    async fn connect(
        &self,
        panel_id: DbId,
        dashboard_id: DbId,
        connected_by: DbId,
    ) -> Result<ConnectOutcome, CoreError> {
        let mut state = self.state.write().await;
        if !state.panel_exists(panel_id) {
            return Err(CoreError::NotFound {
                entity: "LibraryPanel",
                id: panel_id.to_string(),
            });
        }
        if state.connections.contains_key(&(panel_id, dashboard_id)) {
            return Ok(ConnectOutcome::AlreadyConnected);
        }
        state.connections.insert(
            (panel_id, dashboard_id),
            PanelConnection {
                panel_id,
                dashboard_id,
                connected_by,
                connected_at: chrono::Utc::now(),
            },
        );
        Ok(ConnectOutcome::Connected)
    }

    async fn disconnect(&self, panel_id: DbId, dashboard_id: DbId) -> Result<bool, CoreError> {
        let mut state = self.state.write().await;
        Ok(state.connections.remove(&(panel_id, dashboard_id)).is_some())
    }

    async fn count_connections(&self, panel_id: DbId) -> Result<i64, CoreError> {
        let state = self.state.read().await;
        let count = state
            .connections
            .range((panel_id, DbId::MIN)..=(panel_id, DbId::MAX))
            .count();
        Ok(count as i64)
    }

    async fn list_connections(&self, panel_id: DbId) -> Result<Vec<PanelConnection>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .connections
            .range((panel_id, DbId::MIN)..=(panel_id, DbId::MAX))
            .map(|(_, conn)| conn.clone())
            .collect())
    }
}

/* --------------------------------------------------------------------------
StaticFolderGuard
-------------------------------------------------------------------------- */

/// Folder guard driven by an explicit grant list.
#[derive(Debug, Clone, Default)]
pub struct StaticFolderGuard {
    allow_all: bool,
    /// `(org_id, user_id)` pairs allowed to edit every folder of the org.
    org_admins: HashSet<(DbId, DbId)>,
    /// `(user_id, folder_id)` pairs with edit rights.
    grants: HashSet<(DbId, DbId)>,
}

impl StaticFolderGuard {
    /// A guard that denies everything until grants are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A guard that allows every user to edit every folder.
    pub fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Self::default()
        }
    }

    pub fn with_org_admin(mut self, org_id: DbId, user_id: DbId) -> Self {
        self.org_admins.insert((org_id, user_id));
        self
    }

    pub fn with_grant(mut self, user_id: DbId, folder_id: DbId) -> Self {
        self.grants.insert((user_id, folder_id));
        self
    }
}

#[async_trait]
impl FolderGuard for StaticFolderGuard {
    async fn can_edit(
        &self,
        user_id: DbId,
        org_id: DbId,
        folder_id: DbId,
    ) -> Result<bool, CoreError> {
        Ok(self.allow_all
            || self.org_admins.contains(&(org_id, user_id))
            || self.grants.contains(&(user_id, folder_id)))
    }
}

/* --------------------------------------------------------------------------
StaticUserDirectory
-------------------------------------------------------------------------- */

/// User directory backed by a fixed map.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: HashMap<DbId, UserProfile>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user; the avatar is derived from `identity` (email or login).
    pub fn with_user(mut self, id: DbId, name: &str, identity: &str) -> Self {
        self.users.insert(
            id,
            UserProfile {
                name: name.to_string(),
                avatar_url: avatar_url(identity),
            },
        );
        self
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn resolve(&self, user_id: DbId) -> Result<Option<UserProfile>, CoreError> {
        Ok(self.users.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::patch::PanelContent;

    fn new_panel(uid: &str, folder_id: DbId, name: &str) -> NewLibraryPanel {
        let model = match json!({ "title": name }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        NewLibraryPanel {
            uid: uid.to_string(),
            folder_id,
            name: name.to_string(),
            model,
        }
    }

    #[tokio::test]
    async fn create_enforces_name_uniqueness_per_folder() {
        let store = InMemoryPanelStore::new();
        store.create(1, 1, &new_panel("a", 1, "Same")).await.unwrap();

        let err = store.create(1, 1, &new_panel("b", 1, "Same")).await.unwrap_err();
        assert!(matches!(err, CoreError::NameTaken(_)));

        // Other folder and other org are fine.
        store.create(1, 1, &new_panel("c", 2, "Same")).await.unwrap();
        store.create(2, 1, &new_panel("d", 1, "Same")).await.unwrap();
    }

    #[tokio::test]
    async fn update_atomic_on_missing_panel_is_not_found() {
        let store = InMemoryPanelStore::new();
        let mutator = |p: &LibraryPanel| -> Result<PanelContent, CoreError> { Ok(p.content()) };
        let err = store.update_atomic(1, "nope", 1, &mutator).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn mutator_error_leaves_panel_untouched() {
        let store = InMemoryPanelStore::new();
        let created = store.create(1, 1, &new_panel("a", 1, "Panel")).await.unwrap();

        let mutator = |_: &LibraryPanel| -> Result<PanelContent, CoreError> {
            Err(CoreError::Conflict("stop".into()))
        };
        assert!(store.update_atomic(1, "a", 2, &mutator).await.is_err());

        let after = store.get(1, "a").await.unwrap().unwrap();
        assert_eq!(after, created);
    }

    #[tokio::test]
    async fn connect_is_idempotent_and_delete_cascades() {
        let store = InMemoryPanelStore::new();
        let panel = store.create(1, 1, &new_panel("a", 1, "Panel")).await.unwrap();

        assert_eq!(
            store.connect(panel.id, 10, 1).await.unwrap(),
            ConnectOutcome::Connected
        );
        assert_eq!(
            store.connect(panel.id, 10, 1).await.unwrap(),
            ConnectOutcome::AlreadyConnected
        );
        store.connect(panel.id, 11, 1).await.unwrap();
        assert_eq!(store.count_connections(panel.id).await.unwrap(), 2);

        assert!(store.delete(1, "a").await.unwrap());
        assert_eq!(store.count_connections(panel.id).await.unwrap(), 0);
        assert!(store.connect(panel.id, 12, 1).await.is_err());
    }

    #[tokio::test]
    async fn static_guard_grants() {
        let guard = StaticFolderGuard::new()
            .with_org_admin(1, 1)
            .with_grant(2, 5);
        assert!(guard.can_edit(1, 1, 99).await.unwrap());
        assert!(!guard.can_edit(1, 2, 99).await.unwrap());
        assert!(guard.can_edit(2, 1, 5).await.unwrap());
        assert!(!guard.can_edit(2, 1, 6).await.unwrap());
        assert!(StaticFolderGuard::allow_all().can_edit(3, 3, 3).await.unwrap());
    }
}
