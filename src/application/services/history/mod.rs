use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::ports::history_store::HistoryStore;
use crate::domain::uploads::record::UploadRecord;

/// Newest-first upload log persisted through a [`HistoryStore`].
pub struct UploadHistory {
    store: Arc<dyn HistoryStore>,
    // Serializes load-modify-save so concurrent uploads do not drop records.
    write_lock: Mutex<()>,
}

impl UploadHistory {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> anyhow::Result<Vec<UploadRecord>> {
        self.store.load().await
    }

    pub async fn prepend(&self, record: UploadRecord) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load().await?;
        records.insert(0, record);
        self.store.save(&records).await
    }

    pub async fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.save(&[]).await
    }
}
