use serde::{Deserialize, Serialize};

pub const DEFAULT_BRANCH: &str = "main";

/// Credentials and target of every content API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub username: String,
    pub repository: String,
    pub token: String,
    pub branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            repository: String::new(),
            token: String::new(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("repository config incomplete: missing {}", .missing.join(", "))]
pub struct ConfigIncomplete {
    pub missing: Vec<&'static str>,
}

impl RepositoryConfig {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            repository: self.repository.trim().to_string(),
            token: self.token.trim().to_string(),
            branch: self.branch.trim().to_string(),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("username", &self.username),
            ("repository", &self.repository),
            ("token", &self.token),
            ("branch", &self.branch),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Gate for every network operation: all four fields must be non-empty.
    pub fn ensure_complete(&self) -> Result<(), ConfigIncomplete> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigIncomplete { missing })
        }
    }
}

pub fn trim_slashes(path: &str) -> &str {
    path.trim_matches('/')
}

/// Remote path an uploaded file lands at: `<destination>/<file name>`, or the
/// bare file name when no destination directory is given.
pub fn remote_path_for(destination: &str, file_name: &str) -> String {
    let dir = trim_slashes(destination.trim());
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", dir, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RepositoryConfig {
        RepositoryConfig {
            username: "octocat".into(),
            repository: "hello-world".into(),
            token: "ghp_secret".into(),
            branch: "main".into(),
        }
    }

    #[test]
    fn complete_config_passes() {
        assert!(complete().ensure_complete().is_ok());
    }

    #[test]
    fn default_config_is_unconfigured() {
        let err = RepositoryConfig::default().ensure_complete().unwrap_err();
        assert_eq!(err.missing, vec!["username", "repository", "token"]);
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut cfg = complete();
        cfg.token = "   ".into();
        cfg.branch = String::new();
        let err = cfg.ensure_complete().unwrap_err();
        assert_eq!(err.missing, vec!["token", "branch"]);
        assert_eq!(
            err.to_string(),
            "repository config incomplete: missing token, branch"
        );
    }

    #[test]
    fn remote_path_joins_trimmed_destination() {
        assert_eq!(remote_path_for("/assets/img/", "a.png"), "assets/img/a.png");
        assert_eq!(remote_path_for("docs", "readme.md"), "docs/readme.md");
        assert_eq!(remote_path_for("", "a.png"), "a.png");
        assert_eq!(remote_path_for("///", "a.png"), "a.png");
    }
}
