use async_trait::async_trait;

use crate::domain::repository::config::RepositoryConfig;

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<RepositoryConfig>>;
    async fn save(&self, cfg: &RepositoryConfig) -> anyhow::Result<()>;
}
