use tokio::sync::Mutex;

use crate::application::dto::config::{ConfigStatusDto, SaveConfigInput};
use crate::application::ports::config_store::ConfigStore;
use crate::domain::repository::config::{DEFAULT_BRANCH, RepositoryConfig};

pub struct SaveRepositoryConfig<'a, S: ConfigStore + ?Sized> {
    pub store: &'a S,
    /// Shared by every save so the token-keeping load-modify-save is atomic.
    pub write_lock: &'a Mutex<()>,
}

impl<'a, S: ConfigStore + ?Sized> SaveRepositoryConfig<'a, S> {
    /// Persists the config even when incomplete; the returned status says
    /// whether it is usable.
    pub async fn execute(&self, input: SaveConfigInput) -> anyhow::Result<ConfigStatusDto> {
        let _guard = self.write_lock.lock().await;
        let token = match input.token {
            Some(t) => t,
            None => self
                .store
                .load()
                .await?
                .map(|existing| existing.token)
                .unwrap_or_default(),
        };
        let branch = input
            .branch
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let cfg = RepositoryConfig {
            username: input.username,
            repository: input.repository,
            token,
            branch,
        }
        .trimmed();
        self.store.save(&cfg).await?;
        let status: ConfigStatusDto = cfg.into();
        tracing::info!(
            configured = status.configured,
            repository = %status.config.repository,
            branch = %status.config.branch,
            "repository_config_saved"
        );
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryConfigStore {
        saved: Mutex<Option<RepositoryConfig>>,
    }

    #[async_trait]
    impl ConfigStore for MemoryConfigStore {
        async fn load(&self) -> anyhow::Result<Option<RepositoryConfig>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, cfg: &RepositoryConfig) -> anyhow::Result<()> {
            *self.saved.lock().unwrap() = Some(cfg.clone());
            Ok(())
        }
    }

    fn input(token: Option<&str>) -> SaveConfigInput {
        SaveConfigInput {
            username: " octocat ".into(),
            repository: "hello-world".into(),
            token: token.map(str::to_string),
            branch: None,
        }
    }

    #[tokio::test]
    async fn saves_trimmed_config_with_default_branch() {
        let store = MemoryConfigStore::default();
        let lock = tokio::sync::Mutex::new(());
        let uc = SaveRepositoryConfig {
            store: &store,
            write_lock: &lock,
        };
        let status = uc.execute(input(Some("ghp_x"))).await.unwrap();
        assert!(status.configured);
        assert_eq!(status.config.username, "octocat");
        assert_eq!(status.config.branch, "main");
        assert_eq!(store.load().await.unwrap(), Some(status.config));
    }

    #[tokio::test]
    async fn missing_token_keeps_stored_one() {
        let store = MemoryConfigStore::default();
        let lock = tokio::sync::Mutex::new(());
        let uc = SaveRepositoryConfig {
            store: &store,
            write_lock: &lock,
        };
        uc.execute(input(Some("ghp_x"))).await.unwrap();
        let status = uc.execute(input(None)).await.unwrap();
        assert_eq!(status.config.token, "ghp_x");
    }

    #[tokio::test]
    async fn partial_config_is_saved_but_not_configured() {
        let store = MemoryConfigStore::default();
        let lock = tokio::sync::Mutex::new(());
        let uc = SaveRepositoryConfig {
            store: &store,
            write_lock: &lock,
        };
        let status = uc.execute(input(Some(""))).await.unwrap();
        assert!(!status.configured);
        assert_eq!(status.missing, vec!["token"]);
    }

    #[tokio::test]
    async fn concurrent_saves_without_token_keep_it() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = crate::infrastructure::storage::JsonConfigStore::new(temp.path().join("config.json"));
        let lock = tokio::sync::Mutex::new(());
        let uc = SaveRepositoryConfig {
            store: &store,
            write_lock: &lock,
        };
        uc.execute(input(Some("ghp_x"))).await.unwrap();
        let (a, b, c) = tokio::join!(
            uc.execute(input(None)),
            uc.execute(input(None)),
            uc.execute(input(None))
        );
        for status in [a, b, c] {
            assert_eq!(status.unwrap().config.token, "ghp_x");
        }
        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(saved.token, "ghp_x");
        assert_eq!(saved.username, "octocat");
    }
}
