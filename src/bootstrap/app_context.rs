use std::sync::{Arc, Mutex};

use crate::application::ports::config_store::ConfigStore;
use crate::application::ports::repository_content::RepositoryContentPort;
use crate::application::services::explorer::Explorer;
use crate::application::services::history::UploadHistory;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    config_store: Arc<dyn ConfigStore>,
    contents: Arc<dyn RepositoryContentPort>,
    history: Arc<UploadHistory>,
    explorer: Arc<Mutex<Explorer>>,
    config_write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl AppServices {
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        contents: Arc<dyn RepositoryContentPort>,
        history: Arc<UploadHistory>,
    ) -> Self {
        Self {
            config_store,
            contents,
            history,
            explorer: Arc::new(Mutex::new(Explorer::new())),
            config_write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn config_store(&self) -> Arc<dyn ConfigStore> {
        self.services.config_store.clone()
    }

    pub fn contents(&self) -> Arc<dyn RepositoryContentPort> {
        self.services.contents.clone()
    }

    pub fn history(&self) -> Arc<UploadHistory> {
        self.services.history.clone()
    }

    pub fn explorer(&self) -> Arc<Mutex<Explorer>> {
        self.services.explorer.clone()
    }

    pub fn config_write_lock(&self) -> Arc<tokio::sync::Mutex<()>> {
        self.services.config_write_lock.clone()
    }
}
