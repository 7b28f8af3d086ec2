use crate::application::errors::SyncError;
use crate::application::ports::repository_content::RepositoryContentPort;
use crate::domain::repository::config::{RepositoryConfig, trim_slashes};
use crate::domain::repository::content::RepositoryContents;

pub const LIST_FALLBACK_MESSAGE: &str = "Failed to fetch contents";

pub struct ListContents<'a, C: RepositoryContentPort + ?Sized> {
    pub contents: &'a C,
}

impl<'a, C: RepositoryContentPort + ?Sized> ListContents<'a, C> {
    pub async fn execute(
        &self,
        cfg: &RepositoryConfig,
        path: &str,
    ) -> Result<RepositoryContents, SyncError> {
        cfg.ensure_complete()?;
        let path = trim_slashes(path.trim());
        self.contents.get_contents(cfg, path).await.map_err(|err| {
            tracing::debug!(error = ?err, path = %path, "list_contents_failed");
            SyncError::FetchFailed(err.user_message(LIST_FALLBACK_MESSAGE))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repository_content::RemoteError;
    use crate::application::use_cases::contents::tests::{FakeContents, config, file_entry};

    #[tokio::test]
    async fn surfaces_listing_and_single_file_unchanged() {
        let fake = FakeContents::default();
        fake.respond("docs", Ok(RepositoryContents::Listing(vec![])));
        fake.respond(
            "docs/a.md",
            Ok(RepositoryContents::SingleFile(file_entry("docs/a.md", "s1"))),
        );
        let uc = ListContents { contents: &fake };
        assert!(matches!(
            uc.execute(&config(), "/docs/").await.unwrap(),
            RepositoryContents::Listing(_)
        ));
        assert!(matches!(
            uc.execute(&config(), "docs/a.md").await.unwrap(),
            RepositoryContents::SingleFile(_)
        ));
    }

    #[tokio::test]
    async fn failure_uses_server_message_or_fallback() {
        let fake = FakeContents::default();
        fake.respond(
            "gone",
            Err(RemoteError::Status {
                status: 404,
                message: Some("Not Found".into()),
            }),
        );
        fake.respond(
            "bare",
            Err(RemoteError::Status {
                status: 500,
                message: None,
            }),
        );
        let uc = ListContents { contents: &fake };
        let err = uc.execute(&config(), "gone").await.unwrap_err();
        assert_eq!(err.to_string(), "Not Found");
        let err = uc.execute(&config(), "bare").await.unwrap_err();
        assert_eq!(err.to_string(), LIST_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn incomplete_config_never_reaches_remote() {
        let fake = FakeContents::default();
        let mut cfg = config();
        cfg.token.clear();
        let uc = ListContents { contents: &fake };
        assert!(matches!(
            uc.execute(&cfg, "").await,
            Err(SyncError::ConfigIncomplete(_))
        ));
        assert!(fake.gets().is_empty());
    }
}
