use crate::application::dto::config::ConfigStatusDto;
use crate::application::ports::config_store::ConfigStore;

pub struct GetRepositoryConfig<'a, S: ConfigStore + ?Sized> {
    pub store: &'a S,
}

impl<'a, S: ConfigStore + ?Sized> GetRepositoryConfig<'a, S> {
    pub async fn execute(&self) -> anyhow::Result<ConfigStatusDto> {
        let cfg = self.store.load().await?.unwrap_or_default();
        Ok(cfg.into())
    }
}
