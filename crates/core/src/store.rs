//! Transactional persistence for library panel records.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::library_panel::{LibraryPanel, NewLibraryPanel};
use crate::patch::PanelContent;
use crate::types::DbId;

/// Computes the desired content from the current record.
///
/// Runs inside the store's transaction, so it must be pure and quick.
/// Returning an error aborts the update without writing anything.
pub type PanelMutator<'a> =
    &'a (dyn Fn(&LibraryPanel) -> Result<PanelContent, CoreError> + Send + Sync);

/// Persistence for library panels.
///
/// Every implementation guarantees that `(org_id, folder_id, name)` is unique
/// among stored panels, checked and written atomically: of two writers racing
/// for the same name, exactly one succeeds and the other gets
/// [`CoreError::NameTaken`].
#[async_trait]
pub trait PanelStore: Send + Sync {
    /// Insert a new panel with `created_by = updated_by = actor`.
    async fn create(
        &self,
        org_id: DbId,
        actor: DbId,
        input: &NewLibraryPanel,
    ) -> Result<LibraryPanel, CoreError>;

    /// Look up a panel by uid within an org.
    async fn get(&self, org_id: DbId, uid: &str) -> Result<Option<LibraryPanel>, CoreError>;

    /// Load, mutate, validate uniqueness and persist in one transaction.
    ///
    /// Sets `updated_at` to now and `updated_by` to `actor` even when the
    /// content is unchanged. Fails with [`CoreError::NotFound`] when the uid
    /// does not exist in `org_id`.
    async fn update_atomic(
        &self,
        org_id: DbId,
        uid: &str,
        actor: DbId,
        mutator: PanelMutator<'_>,
    ) -> Result<LibraryPanel, CoreError>;

    /// Delete a panel together with all of its connection edges.
    /// Returns `true` if a panel was removed.
    async fn delete(&self, org_id: DbId, uid: &str) -> Result<bool, CoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn health_check(&self) -> Result<(), CoreError>;
}
