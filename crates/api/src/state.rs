use std::sync::Arc;

use libpanels_core::service::LibraryPanelService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Library panel operations over the configured store and collaborators.
    pub panels: Arc<LibraryPanelService>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
