use crate::application::services::codec::ContentFormatError;
use crate::domain::repository::config::ConfigIncomplete;

#[derive(thiserror::Error, Debug, Clone)]
pub enum SyncError {
    #[error(transparent)]
    ConfigIncomplete(#[from] ConfigIncomplete),
    #[error("{0}")]
    FetchFailed(String),
    #[error(transparent)]
    ContentFormat(#[from] ContentFormatError),
}
