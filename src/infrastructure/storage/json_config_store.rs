use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::config_store::ConfigStore;
use crate::domain::repository::config::RepositoryConfig;
use crate::infrastructure::storage::json_file::{read_json, write_json};

pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn load(&self) -> anyhow::Result<Option<RepositoryConfig>> {
        read_json(&self.path).await
    }

    async fn save(&self, cfg: &RepositoryConfig) -> anyhow::Result<()> {
        write_json(&self.path, cfg).await
    }
}
