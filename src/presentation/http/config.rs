use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::config::{ConfigStatusDto, SaveConfigInput};
use crate::application::use_cases::config::get_config::GetRepositoryConfig;
use crate::application::use_cases::config::save_config::SaveRepositoryConfig;
use crate::bootstrap::app_context::AppContext;
use crate::domain::repository::config::RepositoryConfig;
use crate::presentation::http::error::ApiError;

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/config", get(get_config).put(save_config))
        .with_state(ctx)
}

/// Saved repository settings. The token itself never leaves the server.
#[derive(Debug, Serialize, ToSchema)]
pub struct RepositoryConfigResponse {
    pub username: String,
    pub repository: String,
    pub branch: String,
    pub has_token: bool,
    pub configured: bool,
    pub missing: Vec<String>,
}

impl From<ConfigStatusDto> for RepositoryConfigResponse {
    fn from(d: ConfigStatusDto) -> Self {
        RepositoryConfigResponse {
            has_token: !d.config.token.trim().is_empty(),
            username: d.config.username,
            repository: d.config.repository,
            branch: d.config.branch,
            configured: d.configured,
            missing: d.missing.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveConfigRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub repository: String,
    /// Omit (or send null) to keep the stored token.
    pub token: Option<String>,
    pub branch: Option<String>,
}

impl From<SaveConfigRequest> for SaveConfigInput {
    fn from(r: SaveConfigRequest) -> Self {
        SaveConfigInput {
            username: r.username,
            repository: r.repository,
            token: r.token,
            branch: r.branch,
        }
    }
}

/// Current config for handlers that talk to the remote. Completeness is
/// checked by the use cases.
pub(crate) async fn current_config(ctx: &AppContext) -> Result<RepositoryConfig, ApiError> {
    let store = ctx.config_store();
    let uc = GetRepositoryConfig {
        store: store.as_ref(),
    };
    Ok(uc.execute().await?.config)
}

#[utoipa::path(get, path = "/api/config", tag = "Config",
    responses((status = 200, body = RepositoryConfigResponse), (status = 500, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn get_config(
    State(ctx): State<AppContext>,
) -> Result<Json<RepositoryConfigResponse>, ApiError> {
    let store = ctx.config_store();
    let uc = GetRepositoryConfig {
        store: store.as_ref(),
    };
    let status = uc.execute().await?;
    Ok(Json(status.into()))
}

#[utoipa::path(put, path = "/api/config", tag = "Config", request_body = SaveConfigRequest,
    responses((status = 200, body = RepositoryConfigResponse), (status = 500, body = crate::presentation::http::error::ErrorResponse)))]
pub async fn save_config(
    State(ctx): State<AppContext>,
    Json(req): Json<SaveConfigRequest>,
) -> Result<Json<RepositoryConfigResponse>, ApiError> {
    let store = ctx.config_store();
    let write_lock = ctx.config_write_lock();
    let uc = SaveRepositoryConfig {
        store: store.as_ref(),
        write_lock: write_lock.as_ref(),
    };
    let status = uc.execute(req.into()).await?;
    Ok(Json(status.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_hides_token() {
        let dto = ConfigStatusDto::from(RepositoryConfig {
            username: "octocat".into(),
            repository: "hello-world".into(),
            token: "ghp_secret".into(),
            branch: "main".into(),
        });
        let resp = RepositoryConfigResponse::from(dto);
        assert!(resp.has_token);
        assert!(resp.configured);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("ghp_secret"));
    }

    #[test]
    fn missing_fields_are_listed() {
        let resp = RepositoryConfigResponse::from(ConfigStatusDto::from(RepositoryConfig::default()));
        assert!(!resp.configured);
        assert!(!resp.has_token);
        assert_eq!(resp.missing, vec!["username", "repository", "token"]);
    }
}
