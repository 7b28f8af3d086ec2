use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::history_store::HistoryStore;
use crate::domain::uploads::record::UploadRecord;
use crate::infrastructure::storage::json_file::{read_json, write_json};

pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn load(&self) -> anyhow::Result<Vec<UploadRecord>> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn save(&self, records: &[UploadRecord]) -> anyhow::Result<()> {
        write_json(&self.path, records).await
    }
}
