use crate::application::services::history::UploadHistory;

pub struct ClearUploadHistory<'a> {
    pub history: &'a UploadHistory,
}

impl<'a> ClearUploadHistory<'a> {
    pub async fn execute(&self) -> anyhow::Result<()> {
        self.history.clear().await?;
        tracing::info!("upload_history_cleared");
        Ok(())
    }
}
