pub mod health;
pub mod library_panels;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /library-panels                                  create
/// /library-panels/{uid}                            get, patch, delete
/// /library-panels/{uid}/dashboards                 list connections
/// /library-panels/{uid}/dashboards/{dashboard_id}  connect, disconnect
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/library-panels", library_panels::router())
}
