use crate::application::dto::uploads::UploadOutcome;
use crate::application::ports::repository_content::{
    PutContentsRequest, RemoteError, RepositoryContentPort,
};
use crate::application::services::codec;
use crate::application::services::history::UploadHistory;
use crate::domain::repository::config::{ConfigIncomplete, RepositoryConfig, remote_path_for};
use crate::domain::repository::content::{LocalFile, RepositoryContents};
use crate::domain::uploads::record::UploadRecord;

pub const COMMIT_SIGNATURE: &str = "GitPush Web";
pub const UPLOAD_FALLBACK_MESSAGE: &str = "An error occurred during upload.";
pub const NETWORK_FALLBACK_MESSAGE: &str = "Network error or unexpected failure.";

/// Create-or-update of a single file through the content API.
pub struct UploadFile<'a, C: RepositoryContentPort + ?Sized> {
    pub contents: &'a C,
    pub history: &'a UploadHistory,
}

impl<'a, C: RepositoryContentPort + ?Sized> UploadFile<'a, C> {
    /// Only an incomplete config is an error; every remote failure comes back
    /// as an unsuccessful [`UploadOutcome`] and is recorded in the history.
    pub async fn execute(
        &self,
        cfg: &RepositoryConfig,
        file: LocalFile,
        destination: &str,
    ) -> Result<UploadOutcome, ConfigIncomplete> {
        cfg.ensure_complete()?;
        let remote_path = remote_path_for(destination, &file.name);
        let content = codec::encode(&file.bytes);

        let existing_sha = self.existing_sha(cfg, &remote_path).await;
        let updated = existing_sha.is_some();
        let req = PutContentsRequest {
            message: format!(
                "{} {} via {}",
                if updated { "Update" } else { "Upload" },
                file.name,
                COMMIT_SIGNATURE
            ),
            content,
            branch: cfg.branch.clone(),
            sha: existing_sha,
        };

        let outcome = match self.contents.put_contents(cfg, &remote_path, &req).await {
            Ok(written) => UploadOutcome {
                success: true,
                url: written.html_url.unwrap_or_default(),
                message: if updated {
                    "File updated successfully!".to_string()
                } else {
                    "File uploaded successfully!".to_string()
                },
                remote_path,
                updated,
            },
            Err(err) => {
                let fallback = match err {
                    RemoteError::Status { .. } => UPLOAD_FALLBACK_MESSAGE,
                    _ => NETWORK_FALLBACK_MESSAGE,
                };
                tracing::error!(error = ?err, path = %remote_path, "upload_failed");
                UploadOutcome {
                    success: false,
                    url: String::new(),
                    message: err.user_message(fallback),
                    remote_path,
                    updated,
                }
            }
        };

        let record = if outcome.success {
            UploadRecord::succeeded(&file.name, &outcome.remote_path, outcome.url.clone())
        } else {
            UploadRecord::failed(&file.name, &outcome.remote_path, outcome.message.clone())
        };
        if let Err(e) = self.history.prepend(record).await {
            tracing::warn!(error = ?e, "upload_history_persist_failed");
        }
        Ok(outcome)
    }

    /// Blob SHA of the file currently at `path`, if any. Lookup failures of any
    /// kind read as "no such file".
    async fn existing_sha(&self, cfg: &RepositoryConfig, path: &str) -> Option<String> {
        match self.contents.get_contents(cfg, path).await {
            Ok(RepositoryContents::SingleFile(entry)) => Some(entry.sha),
            Ok(RepositoryContents::Listing(_)) => {
                tracing::debug!(path = %path, "upload_target_is_directory");
                None
            }
            Err(RemoteError::Status { status: 404, .. }) => None,
            Err(err) => {
                // Auth and network errors also end up here and turn the write
                // into a create; the PUT then reports the real problem.
                tracing::warn!(error = ?err, path = %path, "upload_existence_check_failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::repository_content::PutContentsResult;
    use crate::application::services::history::tests::MemoryHistoryStore;
    use crate::application::use_cases::contents::tests::{FakeContents, config, file_entry};
    use crate::domain::uploads::record::UploadStatus;

    fn local(name: &str) -> LocalFile {
        LocalFile {
            name: name.to_string(),
            bytes: b"hello".to_vec(),
        }
    }

    fn history() -> UploadHistory {
        UploadHistory::new(Arc::new(MemoryHistoryStore::default()))
    }

    #[tokio::test]
    async fn new_file_is_created_without_sha() {
        let fake = FakeContents::default();
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        let out = uc
            .execute(&config(), local("logo.png"), "/assets/")
            .await
            .unwrap();
        assert!(out.success);
        assert!(!out.updated);
        assert_eq!(out.message, "File uploaded successfully!");
        assert_eq!(
            out.url,
            "https://github.com/octocat/hello-world/blob/main/assets/logo.png"
        );

        assert_eq!(fake.gets(), vec!["assets/logo.png"]);
        let puts = fake.puts();
        assert_eq!(puts.len(), 1);
        let (path, req) = &puts[0];
        assert_eq!(path, "assets/logo.png");
        assert_eq!(req.sha, None);
        assert_eq!(req.content, "aGVsbG8=");
        assert_eq!(req.branch, "main");
        assert_eq!(req.message, "Upload logo.png via GitPush Web");
    }

    #[tokio::test]
    async fn existing_file_is_updated_with_observed_sha() {
        let fake = FakeContents::default();
        fake.respond(
            "notes.txt",
            Ok(RepositoryContents::SingleFile(file_entry("notes.txt", "abc123"))),
        );
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        let out = uc.execute(&config(), local("notes.txt"), "").await.unwrap();
        assert!(out.success);
        assert!(out.updated);
        assert_eq!(out.message, "File updated successfully!");
        let (_, req) = &fake.puts()[0];
        assert_eq!(req.sha.as_deref(), Some("abc123"));
        assert_eq!(req.message, "Update notes.txt via GitPush Web");
    }

    #[tokio::test]
    async fn directory_at_target_path_means_create() {
        let fake = FakeContents::default();
        fake.respond("docs", Ok(RepositoryContents::Listing(vec![])));
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        let out = uc.execute(&config(), local("docs"), "").await.unwrap();
        assert!(!out.updated);
        assert_eq!(fake.puts()[0].1.sha, None);
    }

    #[tokio::test]
    async fn failed_existence_check_still_creates() {
        let fake = FakeContents::default();
        fake.respond(
            "new.txt",
            Err(RemoteError::Transport("dns lookup failed".into())),
        );
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        let out = uc.execute(&config(), local("new.txt"), "").await.unwrap();
        assert!(out.success);
        assert_eq!(fake.puts()[0].1.sha, None);
    }

    #[tokio::test]
    async fn server_error_message_is_returned_verbatim() {
        let fake = FakeContents::default();
        fake.respond_to_write(Err(RemoteError::Status {
            status: 401,
            message: Some("Bad credentials".into()),
        }));
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        let out = uc.execute(&config(), local("a.txt"), "").await.unwrap();
        assert!(!out.success);
        assert_eq!(out.message, "Bad credentials");
        assert_eq!(out.url, "");

        let records = history.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, UploadStatus::Error);
        assert_eq!(records[0].error_message.as_deref(), Some("Bad credentials"));
    }

    #[tokio::test]
    async fn failures_without_message_use_fallbacks() {
        let fake = FakeContents::default();
        fake.respond_to_write(Err(RemoteError::Status {
            status: 422,
            message: None,
        }));
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        let out = uc.execute(&config(), local("a.txt"), "").await.unwrap();
        assert_eq!(out.message, UPLOAD_FALLBACK_MESSAGE);

        fake.respond_to_write(Err(RemoteError::Transport(String::new())));
        let out = uc.execute(&config(), local("a.txt"), "").await.unwrap();
        assert_eq!(out.message, NETWORK_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn success_is_recorded_newest_first() {
        let fake = FakeContents::default();
        fake.respond_to_write(Ok(PutContentsResult {
            html_url: Some("https://github.com/o/r/blob/main/a.txt".into()),
            sha: None,
        }));
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        uc.execute(&config(), local("a.txt"), "").await.unwrap();
        uc.execute(&config(), local("b.txt"), "").await.unwrap();
        let records = history.list().await.unwrap();
        assert_eq!(records[0].name, "b.txt");
        assert_eq!(records[1].status, UploadStatus::Success);
        assert_eq!(records[1].url, "https://github.com/o/r/blob/main/a.txt");
    }

    #[tokio::test]
    async fn incomplete_config_is_rejected_before_any_request() {
        let fake = FakeContents::default();
        let history = history();
        let uc = UploadFile {
            contents: &fake,
            history: &history,
        };
        let mut cfg = config();
        cfg.repository.clear();
        let err = uc.execute(&cfg, local("a.txt"), "").await.unwrap_err();
        assert_eq!(err.missing, vec!["repository"]);
        assert!(fake.gets().is_empty());
        assert!(fake.puts().is_empty());
        assert!(history.list().await.unwrap().is_empty());
    }
}
