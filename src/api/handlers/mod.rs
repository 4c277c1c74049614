use std::sync::MutexGuard;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::SharedChart;
use crate::app::OrgChart;
use crate::document::EXPORT_FILE_NAME;
use crate::error::OrgError;
use crate::models::*;

type ApiResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

/// Map a chart error to a status code and message.
///
/// Chart errors are all user-facing and safe to expose. Only persistence
/// failures are logged as errors; the rest are routine rejections.
fn org_error(e: OrgError) -> (StatusCode, String) {
    let status = match &e {
        OrgError::NotFound(_) => StatusCode::NOT_FOUND,
        OrgError::PermissionDenied => StatusCode::FORBIDDEN,
        OrgError::Validation(_) | OrgError::ImportFormat(_) => StatusCode::BAD_REQUEST,
        OrgError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Internal error: {}", e);
    } else {
        tracing::warn!("Rejected request: {}", e);
    }
    (status, e.to_string())
}

fn lock(chart: &SharedChart) -> MutexGuard<'_, OrgChart> {
    chart.lock().expect("chart lock poisoned")
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Reads
// ============================================================

pub async fn get_tree(State(shared): State<SharedChart>) -> Json<OrgNode> {
    let chart = lock(&shared);
    Json(chart.tree().clone())
}

pub async fn render_tree(State(shared): State<SharedChart>) -> String {
    let chart = lock(&shared);
    chart.render()
}

pub async fn get_stats(State(shared): State<SharedChart>) -> Json<HierarchyStats> {
    let chart = lock(&shared);
    Json(chart.stats())
}

pub async fn export_tree(State(shared): State<SharedChart>) -> ApiResult<impl IntoResponse> {
    let body = lock(&shared).export().map_err(org_error)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    ))
}

// ============================================================
// Session
// ============================================================

pub async fn get_session(State(shared): State<SharedChart>) -> Json<SessionView> {
    let chart = lock(&shared);
    Json(chart.session_view())
}

pub async fn login(
    State(shared): State<SharedChart>,
    Json(input): Json<LoginInput>,
) -> ApiResult<Json<SessionView>> {
    let mut chart = lock(&shared);
    match chart.login(&input.password) {
        Ok(_) => Ok(Json(chart.session_view())),
        Err(_) => Err((StatusCode::UNAUTHORIZED, "Incorrect password".to_string())),
    }
}

pub async fn logout(State(shared): State<SharedChart>) -> Json<SessionView> {
    let mut chart = lock(&shared);
    chart.logout();
    Json(chart.session_view())
}

// ============================================================
// Nodes
// ============================================================

pub async fn rename_node(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
    Json(input): Json<NameInput>,
) -> ApiResult<Json<OrgNode>> {
    let mut chart = lock(&shared);
    chart
        .rename(&id, &input.name)
        .map(|tree| Json(tree.clone()))
        .map_err(org_error)
}

pub async fn add_lead(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
    Json(input): Json<NameInput>,
) -> ApiResult<(StatusCode, Json<OrgNode>)> {
    let mut chart = lock(&shared);
    chart
        .add_lead(&id, &input.name)
        .map(|tree| (StatusCode::CREATED, Json(tree.clone())))
        .map_err(org_error)
}

pub async fn add_member(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
    Json(input): Json<NameInput>,
) -> ApiResult<(StatusCode, Json<OrgNode>)> {
    let mut chart = lock(&shared);
    chart
        .add_member(&id, &input.name)
        .map(|tree| (StatusCode::CREATED, Json(tree.clone())))
        .map_err(org_error)
}

pub async fn delete_node(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrgNode>> {
    let mut chart = lock(&shared);
    chart
        .delete_node(&id)
        .map(|tree| Json(tree.clone()))
        .map_err(org_error)
}

pub async fn toggle_expand(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrgNode>> {
    let mut chart = lock(&shared);
    chart
        .toggle_expand(&id)
        .map(|tree| Json(tree.clone()))
        .map_err(org_error)
}

pub async fn set_expanded(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
    Json(input): Json<SetExpandedInput>,
) -> ApiResult<Json<OrgNode>> {
    let mut chart = lock(&shared);
    chart
        .set_expanded(&id, input.expanded)
        .map(|tree| Json(tree.clone()))
        .map_err(org_error)
}

pub async fn reorder_node(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
    Json(input): Json<ReorderInput>,
) -> ApiResult<Json<OrgNode>> {
    let mut chart = lock(&shared);
    chart
        .reorder_sibling(&id, input.direction)
        .map(|tree| Json(tree.clone()))
        .map_err(org_error)
}

pub async fn move_member(
    State(shared): State<SharedChart>,
    Path(id): Path<String>,
    Json(input): Json<MoveMemberInput>,
) -> ApiResult<Json<OrgNode>> {
    let mut chart = lock(&shared);
    chart
        .move_member(&id, &input.target_lead_id)
        .map(|tree| Json(tree.clone()))
        .map_err(org_error)
}

// ============================================================
// History
// ============================================================

pub async fn get_history(State(shared): State<SharedChart>) -> Json<HistoryStatus> {
    let chart = lock(&shared);
    Json(chart.history_status())
}

pub async fn undo(State(shared): State<SharedChart>) -> ApiResult<Json<HistoryStepResponse>> {
    let mut chart = lock(&shared);
    let changed = chart.undo().map_err(org_error)?;
    Ok(Json(HistoryStepResponse {
        changed,
        history: chart.history_status(),
        tree: chart.tree().clone(),
    }))
}

pub async fn redo(State(shared): State<SharedChart>) -> ApiResult<Json<HistoryStepResponse>> {
    let mut chart = lock(&shared);
    let changed = chart.redo().map_err(org_error)?;
    Ok(Json(HistoryStepResponse {
        changed,
        history: chart.history_status(),
        tree: chart.tree().clone(),
    }))
}

// ============================================================
// Import
// ============================================================

pub async fn import_tree(
    State(shared): State<SharedChart>,
    body: String,
) -> ApiResult<Json<OrgNode>> {
    let mut chart = lock(&shared);
    chart
        .import(&body)
        .map(|tree| Json(tree.clone()))
        .map_err(org_error)
}
