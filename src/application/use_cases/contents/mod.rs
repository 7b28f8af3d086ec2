pub mod get_file;
pub mod list_contents;
pub mod upload_file;

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::application::ports::repository_content::{
        PutContentsRequest, PutContentsResult, RemoteError, RepositoryContentPort,
    };
    use crate::domain::repository::config::RepositoryConfig;
    use crate::domain::repository::content::{
        EntryKind, EntryLinks, RemoteEntry, RepositoryContents,
    };

    pub(crate) fn config() -> RepositoryConfig {
        RepositoryConfig {
            username: "octocat".into(),
            repository: "hello-world".into(),
            token: "ghp_secret".into(),
            branch: "main".into(),
        }
    }

    pub(crate) fn file_entry(path: &str, sha: &str) -> RemoteEntry {
        RemoteEntry {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            sha: sha.to_string(),
            size: 5,
            kind: EntryKind::File,
            links: EntryLinks {
                api_url: format!("https://api.github.com/repos/octocat/hello-world/contents/{}", path),
                html_url: Some(format!("https://github.com/octocat/hello-world/blob/main/{}", path)),
                ..Default::default()
            },
            content: Some("aGVsbG8=".into()),
            encoding: Some("base64".into()),
        }
    }

    /// Scripted content port. Unscripted reads answer 404.
    #[derive(Default)]
    pub(crate) struct FakeContents {
        reads: Mutex<HashMap<String, Result<RepositoryContents, RemoteError>>>,
        write: Mutex<Option<Result<PutContentsResult, RemoteError>>>,
        gets: Mutex<Vec<String>>,
        puts: Mutex<Vec<(String, PutContentsRequest)>>,
    }

    impl FakeContents {
        pub(crate) fn respond(&self, path: &str, result: Result<RepositoryContents, RemoteError>) {
            self.reads.lock().unwrap().insert(path.to_string(), result);
        }

        pub(crate) fn respond_to_write(&self, result: Result<PutContentsResult, RemoteError>) {
            *self.write.lock().unwrap() = Some(result);
        }

        pub(crate) fn gets(&self) -> Vec<String> {
            self.gets.lock().unwrap().clone()
        }

        pub(crate) fn puts(&self) -> Vec<(String, PutContentsRequest)> {
            self.puts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RepositoryContentPort for FakeContents {
        async fn get_contents(
            &self,
            _cfg: &RepositoryConfig,
            path: &str,
        ) -> Result<RepositoryContents, RemoteError> {
            self.gets.lock().unwrap().push(path.to_string());
            self.reads
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .unwrap_or(Err(RemoteError::Status {
                    status: 404,
                    message: Some("Not Found".into()),
                }))
        }

        async fn put_contents(
            &self,
            _cfg: &RepositoryConfig,
            path: &str,
            req: &PutContentsRequest,
        ) -> Result<PutContentsResult, RemoteError> {
            self.puts
                .lock()
                .unwrap()
                .push((path.to_string(), req.clone()));
            self.write.lock().unwrap().clone().unwrap_or_else(|| {
                Ok(PutContentsResult {
                    html_url: Some(format!(
                        "https://github.com/octocat/hello-world/blob/main/{}",
                        path
                    )),
                    sha: Some("new-sha".into()),
                })
            })
        }
    }
}
