use async_trait::async_trait;

use crate::domain::uploads::record::UploadRecord;

/// Ordered upload history, newest first. `save` replaces the whole list.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load(&self) -> anyhow::Result<Vec<UploadRecord>>;
    async fn save(&self, records: &[UploadRecord]) -> anyhow::Result<()>;
}
