use std::sync::Mutex;

use crate::application::ports::repository_content::RepositoryContentPort;
use crate::application::services::explorer::{
    Explorer, ExplorerError, ExplorerView, Selection, lock_explorer,
};
use crate::application::use_cases::explorer::helpers::{run_listing, run_preview};
use crate::domain::repository::config::RepositoryConfig;

/// Click on an entry of the current listing: directories are listed, files
/// previewed.
pub struct OpenEntry<'a, C: RepositoryContentPort + ?Sized> {
    pub contents: &'a C,
    pub explorer: &'a Mutex<Explorer>,
}

impl<'a, C: RepositoryContentPort + ?Sized> OpenEntry<'a, C> {
    pub async fn execute(
        &self,
        cfg: &RepositoryConfig,
        entry_path: &str,
    ) -> Result<ExplorerView, ExplorerError> {
        cfg.ensure_complete()?;
        let selection = lock_explorer(self.explorer).select(entry_path)?;
        let view = match selection {
            Selection::Directory(ticket) => {
                run_listing(self.contents, self.explorer, cfg, ticket).await
            }
            Selection::File(ticket) => run_preview(self.contents, self.explorer, cfg, ticket).await,
        };
        Ok(view)
    }
}
