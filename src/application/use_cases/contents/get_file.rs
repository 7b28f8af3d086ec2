use crate::application::errors::SyncError;
use crate::application::ports::repository_content::RepositoryContentPort;
use crate::domain::repository::config::{RepositoryConfig, trim_slashes};
use crate::domain::repository::content::{RemoteEntry, RepositoryContents};

pub const FILE_FALLBACK_MESSAGE: &str = "Failed to fetch file";

/// Fetch one file with its inline content, for preview.
pub struct GetFile<'a, C: RepositoryContentPort + ?Sized> {
    pub contents: &'a C,
}

impl<'a, C: RepositoryContentPort + ?Sized> GetFile<'a, C> {
    pub async fn execute(&self, cfg: &RepositoryConfig, path: &str) -> Result<RemoteEntry, SyncError> {
        cfg.ensure_complete()?;
        let path = trim_slashes(path.trim());
        let contents = self.contents.get_contents(cfg, path).await.map_err(|err| {
            tracing::debug!(error = ?err, path = %path, "get_file_failed");
            SyncError::FetchFailed(err.user_message(FILE_FALLBACK_MESSAGE))
        })?;
        match contents {
            RepositoryContents::SingleFile(entry) => Ok(entry),
            RepositoryContents::Listing(_) => {
                Err(SyncError::FetchFailed(format!("{} is a directory", path)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repository_content::RemoteError;
    use crate::application::use_cases::contents::tests::{FakeContents, config, file_entry};

    #[tokio::test]
    async fn returns_single_file() {
        let fake = FakeContents::default();
        fake.respond(
            "a.txt",
            Ok(RepositoryContents::SingleFile(file_entry("a.txt", "s1"))),
        );
        let uc = GetFile { contents: &fake };
        assert_eq!(uc.execute(&config(), "a.txt").await.unwrap().sha, "s1");
    }

    #[tokio::test]
    async fn directory_is_not_a_file() {
        let fake = FakeContents::default();
        fake.respond("src", Ok(RepositoryContents::Listing(vec![])));
        let uc = GetFile { contents: &fake };
        let err = uc.execute(&config(), "src").await.unwrap_err();
        assert_eq!(err.to_string(), "src is a directory");
    }

    #[tokio::test]
    async fn transport_error_text_is_kept() {
        let fake = FakeContents::default();
        fake.respond("a.txt", Err(RemoteError::Transport("connection reset".into())));
        let uc = GetFile { contents: &fake };
        let err = uc.execute(&config(), "a.txt").await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }
}
