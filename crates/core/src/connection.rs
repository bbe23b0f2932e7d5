//! Panel-to-dashboard connection edges.
//!
//! Connecting is idempotent: connecting a dashboard that is already
//! connected reports [`ConnectOutcome::AlreadyConnected`] and leaves the edge
//! set untouched. Connection changes never alter the panel's `updated_at` or
//! `updated_by`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// A single edge recording that a dashboard embeds a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConnection {
    pub panel_id: DbId,
    pub dashboard_id: DbId,
    pub connected_by: DbId,
    pub connected_at: Timestamp,
}

/// Result of a connect call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectOutcome {
    Connected,
    AlreadyConnected,
}

/// Result of a disconnect call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectOutcome {
    Disconnected,
    NotConnected,
}

/// Status returned by connect/disconnect operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus<O> {
    pub panel_uid: String,
    pub dashboard_id: DbId,
    pub outcome: O,
    pub connected_dashboards: i64,
}

/// Manages the panel-to-dashboard edge set.
///
/// Writes are visible to subsequent reads on the same tracker. `connect`
/// fails with [`CoreError::NotFound`] when the panel no longer exists.
#[async_trait]
pub trait ConnectionTracker: Send + Sync {
    async fn connect(
        &self,
        panel_id: DbId,
        dashboard_id: DbId,
        connected_by: DbId,
    ) -> Result<ConnectOutcome, CoreError>;

    /// Remove an edge. Returns `true` if one was removed.
    async fn disconnect(&self, panel_id: DbId, dashboard_id: DbId) -> Result<bool, CoreError>;

    async fn count_connections(&self, panel_id: DbId) -> Result<i64, CoreError>;

    /// All edges of a panel, ordered by dashboard id.
    async fn list_connections(&self, panel_id: DbId) -> Result<Vec<PanelConnection>, CoreError>;
}

/// Reject dashboard ids that cannot refer to a real dashboard.
pub fn validate_dashboard_id(dashboard_id: DbId) -> Result<(), CoreError> {
    if dashboard_id <= 0 {
        return Err(CoreError::Validation(format!(
            "Invalid dashboard id: {dashboard_id}"
        )));
    }
    Ok(())
}
