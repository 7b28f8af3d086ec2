use crate::application::services::history::UploadHistory;
use crate::domain::uploads::record::UploadRecord;

pub struct ListUploadHistory<'a> {
    pub history: &'a UploadHistory,
}

impl<'a> ListUploadHistory<'a> {
    pub async fn execute(&self) -> anyhow::Result<Vec<UploadRecord>> {
        self.history.list().await
    }
}
