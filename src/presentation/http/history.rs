use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::history::clear_history::ClearUploadHistory;
use crate::application::use_cases::history::list_history::ListUploadHistory;
use crate::bootstrap::app_context::AppContext;
use crate::domain::uploads::record::{UploadRecord, UploadStatus};
use crate::presentation::http::error::ApiError;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/history", get(list_history).delete(clear_history))
        .with_state(ctx)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadRecordResponse {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub url: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// `success` or `error`.
    pub status: &'static str,
    pub error_message: Option<String>,
}

impl From<UploadRecord> for UploadRecordResponse {
    fn from(r: UploadRecord) -> Self {
        UploadRecordResponse {
            id: r.id,
            name: r.name,
            path: r.path,
            url: r.url,
            timestamp: r.timestamp,
            status: match r.status {
                UploadStatus::Success => "success",
                UploadStatus::Error => "error",
            },
            error_message: r.error_message,
        }
    }
}

#[utoipa::path(get, path = "/api/history", tag = "History",
    responses((status = 200, body = [UploadRecordResponse]), (status = 500, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn list_history(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<UploadRecordResponse>>, ApiError> {
    let history = ctx.history();
    let uc = ListUploadHistory {
        history: history.as_ref(),
    };
    let records = uc.execute().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(delete, path = "/api/history", tag = "History",
    responses((status = 204, description = "Cleared"), (status = 500, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn clear_history(State(ctx): State<AppContext>) -> Result<StatusCode, ApiError> {
    let history = ctx.history();
    let uc = ClearUploadHistory {
        history: history.as_ref(),
    };
    uc.execute().await?;
    Ok(StatusCode::NO_CONTENT)
}
