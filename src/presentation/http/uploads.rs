use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::dto::uploads::UploadOutcome;
use crate::application::use_cases::contents::upload_file::UploadFile;
use crate::bootstrap::app_context::AppContext;
use crate::domain::repository::content::LocalFile;
use crate::presentation::http::config::current_config;
use crate::presentation::http::error::ApiError;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/uploads", post(upload_file))
        .with_state(ctx)
}

/// A rejected write still answers 200 with `success: false`; the message is
/// the one GitHub gave, when it gave one.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub message: String,
    pub path: String,
    pub updated: bool,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(o: UploadOutcome) -> Self {
        UploadResponse {
            success: o.success,
            url: o.url,
            message: o.message,
            path: o.remote_path,
            updated: o.updated,
        }
    }
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadMultipart {
    /// File to upload
    #[schema(value_type = String, format = Binary)]
    file: String,
    /// Destination directory in the repository; empty for the root
    path: Option<String>,
}

/// Base name of a browser-supplied file name; some clients send full paths.
fn base_name(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim()
}

#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "Uploads",
    request_body(content = UploadMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload attempted", body = UploadResponse),
        (status = 400, body = crate::presentation::http::error::ErrorResponse),
        (status = 412, description = "Repository config incomplete", body = crate::presentation::http::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::presentation::http::error::ErrorResponse)
    )
)]
pub async fn upload_file(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<LocalFile> = None;
    let mut destination = String::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!(error = ?e, "upload_multipart_read_failed");
        ApiError::bad_request("malformed multipart body")
    })? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(|n| base_name(n).to_string())
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| ApiError::bad_request("file field has no file name"))?;
                let data = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = ?e, file = %file_name, "upload_file_read_failed");
                    ApiError::bad_request(format!("could not read {file_name}"))
                })?;
                if data.len() > ctx.cfg.upload_max_bytes {
                    return Err(ApiError::new(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        format!("{file_name} exceeds {} bytes", ctx.cfg.upload_max_bytes),
                    ));
                }
                file = Some(LocalFile {
                    name: file_name,
                    bytes: data.to_vec(),
                });
            }
            Some("path") => {
                destination = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request("could not read path field"))?;
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("file field is required"))?;
    let cfg = current_config(&ctx).await?;
    let contents = ctx.contents();
    let history = ctx.history();
    let uc = UploadFile {
        contents: contents.as_ref(),
        history: history.as_ref(),
    };
    let outcome = uc.execute(&cfg, file, &destination).await?;
    tracing::info!(
        path = %outcome.remote_path,
        success = outcome.success,
        updated = outcome.updated,
        "upload_attempted"
    );
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_client_directories() {
        assert_eq!(base_name("logo.png"), "logo.png");
        assert_eq!(base_name("C:\\Users\\me\\logo.png"), "logo.png");
        assert_eq!(base_name("photos/2024/cat.jpg"), "cat.jpg");
        assert_eq!(base_name("dir/"), "");
    }
}
