//! PostgreSQL implementation of the panel store and connection tracker.

use async_trait::async_trait;
use libpanels_core::connection::{ConnectOutcome, ConnectionTracker, PanelConnection};
use libpanels_core::error::CoreError;
use libpanels_core::library_panel::{LibraryPanel, NewLibraryPanel};
use libpanels_core::store::{PanelMutator, PanelStore};
use libpanels_core::types::DbId;

use crate::error::{internal, map_sqlx_error};
use crate::repositories::{LibraryPanelRepo, PanelConnectionRepo};
use crate::DbPool;

/// Panel store backed by the `library_panels` and
/// `library_panel_connections` tables.
#[derive(Clone)]
pub struct PgPanelStore {
    pool: DbPool,
}

impl PgPanelStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PanelStore for PgPanelStore {
    async fn create(
        &self,
        org_id: DbId,
        actor: DbId,
        input: &NewLibraryPanel,
    ) -> Result<LibraryPanel, CoreError> {
        let row = LibraryPanelRepo::create(&self.pool, org_id, actor, input)
            .await
            .map_err(|e| map_sqlx_error(e, "LibraryPanel", &input.name))?;
        Ok(row.into())
    }

    async fn get(&self, org_id: DbId, uid: &str) -> Result<Option<LibraryPanel>, CoreError> {
        let row = LibraryPanelRepo::find_by_uid(&self.pool, org_id, uid)
            .await
            .map_err(internal)?;
        Ok(row.map(Into::into))
    }

    /// Runs as: lock the row, mutate, check the name, write, commit.
    ///
    /// The explicit name check gives a clean error in the common case; the
    /// `uq_library_panels_org_folder_name` index rejects a concurrent writer
    /// that slips past it, and that violation is also reported as `NameTaken`.
    async fn update_atomic(
        &self,
        org_id: DbId,
        uid: &str,
        actor: DbId,
        mutator: PanelMutator<'_>,
    ) -> Result<LibraryPanel, CoreError> {
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let current: LibraryPanel = LibraryPanelRepo::find_by_uid_for_update(&mut tx, org_id, uid)
            .await
            .map_err(internal)?
            .ok_or_else(|| CoreError::panel_not_found(uid))?
            .into();

        // Dropping `tx` on any early return rolls back.
        let next = mutator(&current)?;

        let taken =
            LibraryPanelRepo::name_exists(&mut tx, org_id, next.folder_id, &next.name, uid)
                .await
                .map_err(internal)?;
        if taken {
            return Err(CoreError::NameTaken(next.name));
        }

        let row = LibraryPanelRepo::update_content(&mut tx, current.id, &next, actor)
            .await
            .map_err(|e| map_sqlx_error(e, "LibraryPanel", &next.name))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, "LibraryPanel", &next.name))?;
        Ok(row.into())
    }

    async fn delete(&self, org_id: DbId, uid: &str) -> Result<bool, CoreError> {
        LibraryPanelRepo::delete(&self.pool, org_id, uid)
            .await
            .map_err(internal)
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(internal)
    }
}

#[async_trait]
impl ConnectionTracker for PgPanelStore {
    async fn connect(
        &self,
        panel_id: DbId,
        dashboard_id: DbId,
        connected_by: DbId,
    ) -> Result<ConnectOutcome, CoreError> {
        let inserted = PanelConnectionRepo::connect(&self.pool, panel_id, dashboard_id, connected_by)
            .await
            .map_err(|e| map_sqlx_error(e, "LibraryPanel", &panel_id.to_string()))?;
        Ok(match inserted {
            Some(_) => ConnectOutcome::Connected,
            None => ConnectOutcome::AlreadyConnected,
        })
    }

    async fn disconnect(&self, panel_id: DbId, dashboard_id: DbId) -> Result<bool, CoreError> {
        PanelConnectionRepo::disconnect(&self.pool, panel_id, dashboard_id)
            .await
            .map_err(internal)
    }

    async fn count_connections(&self, panel_id: DbId) -> Result<i64, CoreError> {
        PanelConnectionRepo::count_by_panel(&self.pool, panel_id)
            .await
            .map_err(internal)
    }

    async fn list_connections(&self, panel_id: DbId) -> Result<Vec<PanelConnection>, CoreError> {
        let rows = PanelConnectionRepo::list_by_panel(&self.pool, panel_id)
            .await
            .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
