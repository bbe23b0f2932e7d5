//! Handlers for reusable library panels.
//!
//! Every endpoint requires authentication; the org comes from the token, so
//! a uid belonging to another org is indistinguishable from a missing one.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use libpanels_core::library_panel::{CreateLibraryPanel, PatchLibraryPanel};
use libpanels_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /library-panels
// ---------------------------------------------------------------------------

/// Create a library panel.
pub async fn create_panel(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLibraryPanel>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .panels
        .create_panel(auth.org_id, auth.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

// ---------------------------------------------------------------------------
// GET /library-panels/{uid}
// ---------------------------------------------------------------------------

pub async fn get_panel(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(uid): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .panels
        .get_panel(auth.org_id, &uid, auth.user_id)
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// PATCH /library-panels/{uid}
// ---------------------------------------------------------------------------

/// Partially update a library panel.
///
/// Omitted fields are left unchanged. A `name` also rewrites `model.title`;
/// a `model` replaces the stored model wholesale.
pub async fn patch_panel(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(uid): AppPath<String>,
    AppJson(input): AppJson<PatchLibraryPanel>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .panels
        .patch_panel(auth.org_id, &uid, auth.user_id, input)
        .await?;
    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// DELETE /library-panels/{uid}
// ---------------------------------------------------------------------------

pub async fn delete_panel(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(uid): AppPath<String>,
) -> AppResult<StatusCode> {
    state
        .panels
        .delete_panel(auth.org_id, &uid, auth.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /library-panels/{uid}/dashboards
// ---------------------------------------------------------------------------

/// List the dashboards connected to a panel.
pub async fn list_connections(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(uid): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    let connections = state.panels.list_connections(auth.org_id, &uid).await?;
    tracing::debug!(uid = %uid, count = connections.len(), "Listed panel connections");
    Ok(Json(DataResponse { data: connections }))
}

// ---------------------------------------------------------------------------
// POST /library-panels/{uid}/dashboards/{dashboard_id}
// ---------------------------------------------------------------------------

/// Connect a dashboard to a panel. Connecting twice returns
/// `already_connected` with 200.
pub async fn connect_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath((uid, dashboard_id)): AppPath<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let status = state
        .panels
        .connect_panel(auth.org_id, &uid, dashboard_id, auth.user_id)
        .await?;
    Ok(Json(DataResponse { data: status }))
}

// ---------------------------------------------------------------------------
// DELETE /library-panels/{uid}/dashboards/{dashboard_id}
// ---------------------------------------------------------------------------

pub async fn disconnect_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath((uid, dashboard_id)): AppPath<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let status = state
        .panels
        .disconnect_panel(auth.org_id, &uid, dashboard_id, auth.user_id)
        .await?;
    Ok(Json(DataResponse { data: status }))
}
