use std::sync::Mutex;

use crate::application::ports::repository_content::RepositoryContentPort;
use crate::application::services::explorer::{Explorer, ExplorerError, ExplorerView, lock_explorer};
use crate::application::use_cases::explorer::helpers::run_listing;
use crate::domain::repository::config::RepositoryConfig;

pub struct BrowsePath<'a, C: RepositoryContentPort + ?Sized> {
    pub contents: &'a C,
    pub explorer: &'a Mutex<Explorer>,
}

impl<'a, C: RepositoryContentPort + ?Sized> BrowsePath<'a, C> {
    pub async fn execute(
        &self,
        cfg: &RepositoryConfig,
        path: &str,
    ) -> Result<ExplorerView, ExplorerError> {
        cfg.ensure_complete()?;
        let ticket = lock_explorer(self.explorer).submit(path);
        Ok(run_listing(self.contents, self.explorer, cfg, ticket).await)
    }
}
