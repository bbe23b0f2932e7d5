//! Route definitions for library panels, mounted at `/library-panels`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::library_panels;
use crate::state::AppState;

/// ```text
/// POST   /                               -> create_panel
/// GET    /{uid}                          -> get_panel
/// PATCH  /{uid}                          -> patch_panel
/// DELETE /{uid}                          -> delete_panel
/// GET    /{uid}/dashboards               -> list_connections
/// POST   /{uid}/dashboards/{dashboard_id} -> connect_dashboard
/// DELETE /{uid}/dashboards/{dashboard_id} -> disconnect_dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(library_panels::create_panel))
        .route(
            "/{uid}",
            get(library_panels::get_panel)
                .patch(library_panels::patch_panel)
                .delete(library_panels::delete_panel),
        )
        .route("/{uid}/dashboards", get(library_panels::list_connections))
        .route(
            "/{uid}/dashboards/{dashboard_id}",
            post(library_panels::connect_dashboard).delete(library_panels::disconnect_dashboard),
        )
}
