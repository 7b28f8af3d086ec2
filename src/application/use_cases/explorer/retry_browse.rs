use std::sync::Mutex;

use crate::application::ports::repository_content::RepositoryContentPort;
use crate::application::services::explorer::{Explorer, ExplorerError, ExplorerView, lock_explorer};
use crate::application::use_cases::explorer::helpers::run_listing;
use crate::domain::repository::config::RepositoryConfig;

pub struct RetryBrowse<'a, C: RepositoryContentPort + ?Sized> {
    pub contents: &'a C,
    pub explorer: &'a Mutex<Explorer>,
}

impl<'a, C: RepositoryContentPort + ?Sized> RetryBrowse<'a, C> {
    pub async fn execute(&self, cfg: &RepositoryConfig) -> Result<ExplorerView, ExplorerError> {
        cfg.ensure_complete()?;
        let ticket = lock_explorer(self.explorer).retry()?;
        Ok(run_listing(self.contents, self.explorer, cfg, ticket).await)
    }
}
