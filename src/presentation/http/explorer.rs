use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::services::explorer::{ExplorerView, lock_explorer};
use crate::application::use_cases::explorer::browse_path::BrowsePath;
use crate::application::use_cases::explorer::open_entry::OpenEntry;
use crate::application::use_cases::explorer::retry_browse::RetryBrowse;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::config::current_config;
use crate::presentation::http::contents::{EntryResponse, PreviewResponse};
use crate::presentation::http::error::ApiError;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/explorer", get(get_explorer))
        .route("/explorer/submit", post(submit_path))
        .route("/explorer/select", post(select_entry))
        .route("/explorer/retry", post(retry))
        .route("/explorer/reset", post(reset))
        .with_state(ctx)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExplorerViewResponse {
    /// `idle`, `listing`, `listed`, `preview_loading`, `previewing` or `failed`.
    pub phase: &'static str,
    pub current_path: String,
    pub last_attempted: Option<String>,
    pub entries: Vec<EntryResponse>,
    pub preview: Option<PreviewResponse>,
    pub error: Option<String>,
}

impl From<ExplorerView> for ExplorerViewResponse {
    fn from(v: ExplorerView) -> Self {
        ExplorerViewResponse {
            phase: v.phase.as_str(),
            current_path: v.current_path,
            last_attempted: v.last_attempted,
            entries: v.entries.into_iter().map(Into::into).collect(),
            preview: v.preview.map(Into::into),
            error: v.error,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExplorerPathRequest {
    #[serde(default)]
    pub path: String,
}

#[utoipa::path(get, path = "/api/explorer", tag = "Explorer",
    responses((status = 200, body = ExplorerViewResponse)))]
pub async fn get_explorer(State(ctx): State<AppContext>) -> Json<ExplorerViewResponse> {
    let explorer = ctx.explorer();
    let view = lock_explorer(&explorer).view();
    Json(view.into())
}

#[utoipa::path(post, path = "/api/explorer/submit", tag = "Explorer", request_body = ExplorerPathRequest,
    responses(
        (status = 200, body = ExplorerViewResponse),
        (status = 412, description = "Repository config incomplete", body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn submit_path(
    State(ctx): State<AppContext>,
    Json(req): Json<ExplorerPathRequest>,
) -> Result<Json<ExplorerViewResponse>, ApiError> {
    let cfg = current_config(&ctx).await?;
    let contents = ctx.contents();
    let explorer = ctx.explorer();
    let uc = BrowsePath {
        contents: contents.as_ref(),
        explorer: explorer.as_ref(),
    };
    let view = uc.execute(&cfg, &req.path).await?;
    Ok(Json(view.into()))
}

#[utoipa::path(post, path = "/api/explorer/select", tag = "Explorer", request_body = ExplorerPathRequest,
    responses(
        (status = 200, body = ExplorerViewResponse),
        (status = 404, description = "Path is not in the current listing", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Another request is in flight", body = crate::presentation::http::error::ErrorResponse),
        (status = 412, description = "Repository config incomplete", body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn select_entry(
    State(ctx): State<AppContext>,
    Json(req): Json<ExplorerPathRequest>,
) -> Result<Json<ExplorerViewResponse>, ApiError> {
    let cfg = current_config(&ctx).await?;
    let contents = ctx.contents();
    let explorer = ctx.explorer();
    let uc = OpenEntry {
        contents: contents.as_ref(),
        explorer: explorer.as_ref(),
    };
    let view = uc.execute(&cfg, &req.path).await?;
    Ok(Json(view.into()))
}

#[utoipa::path(post, path = "/api/explorer/retry", tag = "Explorer",
    responses(
        (status = 200, body = ExplorerViewResponse),
        (status = 409, description = "No earlier request to retry", body = crate::presentation::http::error::ErrorResponse),
        (status = 412, description = "Repository config incomplete", body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn retry(State(ctx): State<AppContext>) -> Result<Json<ExplorerViewResponse>, ApiError> {
    let cfg = current_config(&ctx).await?;
    let contents = ctx.contents();
    let explorer = ctx.explorer();
    let uc = RetryBrowse {
        contents: contents.as_ref(),
        explorer: explorer.as_ref(),
    };
    let view = uc.execute(&cfg).await?;
    Ok(Json(view.into()))
}

#[utoipa::path(post, path = "/api/explorer/reset", tag = "Explorer",
    responses((status = 200, body = ExplorerViewResponse)))]
pub async fn reset(State(ctx): State<AppContext>) -> Json<ExplorerViewResponse> {
    let explorer = ctx.explorer();
    let mut guard = lock_explorer(&explorer);
    guard.reset();
    Json(guard.view().into())
}
