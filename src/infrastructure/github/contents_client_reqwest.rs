use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::application::ports::repository_content::{
    PutContentsRequest, PutContentsResult, RemoteError, RepositoryContentPort,
};
use crate::domain::repository::config::RepositoryConfig;
use crate::domain::repository::content::{
    EntryKind, EntryLinks, RemoteEntry, RepositoryContents,
};

pub const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Single-attempt client for `/repos/{owner}/{repo}/contents/{path}`.
pub struct ReqwestGitHubContents {
    client: reqwest::Client,
    api_base: String,
}

impl ReqwestGitHubContents {
    pub fn new(api_base: &str, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("build github http client")?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn contents_url(&self, cfg: &RepositoryConfig, path: &str) -> String {
        let mut url = format!(
            "{}/repos/{}/{}/contents",
            self.api_base,
            urlencoding::encode(&cfg.username),
            urlencoding::encode(&cfg.repository)
        );
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }
}

#[derive(Debug, Deserialize)]
struct ContentItemWire {
    name: String,
    path: String,
    sha: String,
    #[serde(default)]
    size: u64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    url: String,
    html_url: Option<String>,
    download_url: Option<String>,
    git_url: Option<String>,
    content: Option<String>,
    encoding: Option<String>,
}

impl From<ContentItemWire> for RemoteEntry {
    fn from(w: ContentItemWire) -> Self {
        let kind = match w.kind.as_str() {
            "dir" => EntryKind::Dir,
            "symlink" => EntryKind::Symlink,
            "submodule" => EntryKind::Submodule,
            _ => EntryKind::File,
        };
        RemoteEntry {
            name: w.name,
            path: w.path,
            sha: w.sha,
            size: w.size,
            kind,
            links: EntryLinks {
                api_url: w.url,
                html_url: w.html_url,
                download_url: w.download_url,
                git_url: w.git_url,
            },
            // Listings never inline file bodies.
            content: if kind == EntryKind::Dir { None } else { w.content },
            encoding: w.encoding,
        }
    }
}

#[derive(Debug, Serialize)]
struct PutBodyWire<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutResponseWire {
    content: Option<WrittenContentWire>,
}

#[derive(Debug, Deserialize)]
struct WrittenContentWire {
    html_url: Option<String>,
    sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyWire {
    message: Option<String>,
}

fn parse_item(value: JsonValue) -> Result<RemoteEntry, RemoteError> {
    serde_json::from_value::<ContentItemWire>(value)
        .map(Into::into)
        .map_err(|e| RemoteError::Decode(e.to_string()))
}

async fn status_error(resp: reqwest::Response) -> RemoteError {
    let status = resp.status().as_u16();
    let message = resp
        .json::<ErrorBodyWire>()
        .await
        .ok()
        .and_then(|b| b.message);
    RemoteError::Status { status, message }
}

#[async_trait]
impl RepositoryContentPort for ReqwestGitHubContents {
    async fn get_contents(
        &self,
        cfg: &RepositoryConfig,
        path: &str,
    ) -> Result<RepositoryContents, RemoteError> {
        let url = self.contents_url(cfg, path);
        tracing::debug!(%url, branch = %cfg.branch, "github_get_contents");
        let resp = self
            .client
            .get(&url)
            .query(&[("ref", cfg.branch.as_str())])
            .bearer_auth(&cfg.token)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        let body: JsonValue = resp
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        match body {
            JsonValue::Array(items) => items
                .into_iter()
                .map(parse_item)
                .collect::<Result<Vec<_>, _>>()
                .map(RepositoryContents::Listing),
            item @ JsonValue::Object(_) => parse_item(item).map(RepositoryContents::SingleFile),
            other => Err(RemoteError::Decode(format!(
                "expected array or object, got {}",
                other
            ))),
        }
    }

    async fn put_contents(
        &self,
        cfg: &RepositoryConfig,
        path: &str,
        req: &PutContentsRequest,
    ) -> Result<PutContentsResult, RemoteError> {
        let url = self.contents_url(cfg, path);
        tracing::debug!(%url, branch = %req.branch, update = req.sha.is_some(), "github_put_contents");
        let body = PutBodyWire {
            message: &req.message,
            content: &req.content,
            branch: &req.branch,
            sha: req.sha.as_deref(),
        };
        let resp = self
            .client
            .put(&url)
            .bearer_auth(&cfg.token)
            .header(ACCEPT, GITHUB_JSON)
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        let written: PutResponseWire = resp
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        let content = written
            .content
            .ok_or_else(|| RemoteError::Decode("response has no content object".into()))?;
        Ok(PutContentsResult {
            html_url: content.html_url,
            sha: content.sha,
        })
    }
}
