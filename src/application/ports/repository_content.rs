use async_trait::async_trait;

use crate::domain::repository::config::RepositoryConfig;
use crate::domain::repository::content::RepositoryContents;

#[derive(Debug, Clone)]
pub struct PutContentsRequest {
    pub message: String,
    /// Base64 payload.
    pub content: String,
    pub branch: String,
    /// Present when updating an existing blob, absent when creating.
    pub sha: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PutContentsResult {
    pub html_url: Option<String>,
    pub sha: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum RemoteError {
    /// Non-success HTTP status; `message` is the server-supplied text, if any.
    #[error("remote returned status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("{0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Message to show the user, falling back to `fallback` when the server
    /// or transport gave nothing usable.
    pub fn user_message(&self, fallback: &str) -> String {
        let text = match self {
            RemoteError::Status { message, .. } => message.clone().unwrap_or_default(),
            RemoteError::Transport(msg) | RemoteError::Decode(msg) => msg.clone(),
        };
        if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        }
    }
}

#[async_trait]
pub trait RepositoryContentPort: Send + Sync {
    async fn get_contents(
        &self,
        cfg: &RepositoryConfig,
        path: &str,
    ) -> Result<RepositoryContents, RemoteError>;

    async fn put_contents(
        &self,
        cfg: &RepositoryConfig,
        path: &str,
        req: &PutContentsRequest,
    ) -> Result<PutContentsResult, RemoteError>;
}
