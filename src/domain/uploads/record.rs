use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// One completed upload attempt. Records are never edited, only cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub path: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl UploadRecord {
    pub fn succeeded(name: &str, path: &str, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            path: path.to_string(),
            url,
            timestamp: Utc::now(),
            status: UploadStatus::Success,
            error_message: None,
        }
    }

    pub fn failed(name: &str, path: &str, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            path: path.to_string(),
            url: String::new(),
            timestamp: Utc::now(),
            status: UploadStatus::Error,
            error_message: Some(message),
        }
    }
}
