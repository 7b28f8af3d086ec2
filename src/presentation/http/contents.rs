use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::services::explorer::{Preview, PreviewBody};
use crate::application::use_cases::contents::get_file::GetFile;
use crate::application::use_cases::contents::list_contents::ListContents;
use crate::bootstrap::app_context::AppContext;
use crate::domain::repository::content::{RemoteEntry, RepositoryContents};
use crate::presentation::http::config::current_config;
use crate::presentation::http::error::ApiError;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/contents", get(list_contents))
        .route("/contents/file", get(get_file))
        .with_state(ctx)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EntryResponse {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    /// One of `file`, `dir`, `symlink`, `submodule`.
    pub kind: String,
    pub url: String,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
    pub git_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl From<RemoteEntry> for EntryResponse {
    fn from(e: RemoteEntry) -> Self {
        EntryResponse {
            name: e.name,
            path: e.path,
            sha: e.sha,
            size: e.size,
            kind: e.kind.as_str().to_string(),
            url: e.links.api_url,
            html_url: e.links.html_url,
            download_url: e.links.download_url,
            git_url: e.links.git_url,
            content: e.content,
            encoding: e.encoding,
        }
    }
}

/// Decoded file body: `image` carries a data URI in `src`, `text` the
/// decoded text, `empty` neither.
#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewBodyResponse {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl From<PreviewBody> for PreviewBodyResponse {
    fn from(b: PreviewBody) -> Self {
        match b {
            PreviewBody::Image { src } => PreviewBodyResponse {
                kind: "image",
                src: Some(src),
                text: None,
            },
            PreviewBody::Text { text } => PreviewBodyResponse {
                kind: "text",
                src: None,
                text: Some(text),
            },
            PreviewBody::Empty => PreviewBodyResponse {
                kind: "empty",
                src: None,
                text: None,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    pub name: String,
    pub path: String,
    pub html_url: Option<String>,
    pub body: PreviewBodyResponse,
}

impl From<Preview> for PreviewResponse {
    fn from(p: Preview) -> Self {
        PreviewResponse {
            name: p.name,
            path: p.path,
            html_url: p.html_url,
            body: p.body.into(),
        }
    }
}

/// `kind` is `listing` (with `entries`) or `file` (with `entry`), exactly as
/// the remote answered.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContentsResponse {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<EntryResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryResponse>,
}

impl From<RepositoryContents> for ContentsResponse {
    fn from(c: RepositoryContents) -> Self {
        match c {
            RepositoryContents::Listing(entries) => ContentsResponse {
                kind: "listing",
                entries: Some(entries.into_iter().map(Into::into).collect()),
                entry: None,
            },
            RepositoryContents::SingleFile(entry) => ContentsResponse {
                kind: "file",
                entries: None,
                entry: Some(entry.into()),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    pub entry: EntryResponse,
    pub preview: PreviewResponse,
}

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: String,
}

#[utoipa::path(get, path = "/api/contents", tag = "Contents",
    params(("path" = Option<String>, Query, description = "Repository path; empty for the root")),
    responses(
        (status = 200, body = ContentsResponse),
        (status = 412, description = "Repository config incomplete", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Remote fetch failed", body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn list_contents(
    State(ctx): State<AppContext>,
    Query(q): Query<PathQuery>,
) -> Result<Json<ContentsResponse>, ApiError> {
    let cfg = current_config(&ctx).await?;
    let contents = ctx.contents();
    let uc = ListContents {
        contents: contents.as_ref(),
    };
    let out = uc.execute(&cfg, &q.path).await?;
    Ok(Json(out.into()))
}

#[utoipa::path(get, path = "/api/contents/file", tag = "Contents",
    params(("path" = String, Query, description = "Path of a file in the repository")),
    responses(
        (status = 200, body = FileResponse),
        (status = 412, description = "Repository config incomplete", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Content could not be decoded", body = crate::presentation::http::error::ErrorResponse),
        (status = 502, description = "Remote fetch failed", body = crate::presentation::http::error::ErrorResponse)
    ))]
pub async fn get_file(
    State(ctx): State<AppContext>,
    Query(q): Query<PathQuery>,
) -> Result<Json<FileResponse>, ApiError> {
    if q.path.trim().trim_matches('/').is_empty() {
        return Err(ApiError::bad_request("path is required"));
    }
    let cfg = current_config(&ctx).await?;
    let contents = ctx.contents();
    let uc = GetFile {
        contents: contents.as_ref(),
    };
    let entry = uc.execute(&cfg, &q.path).await?;
    let preview = Preview::from_entry(&entry)?;
    Ok(Json(FileResponse {
        entry: entry.into(),
        preview: preview.into(),
    }))
}
