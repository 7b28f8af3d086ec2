use crate::domain::repository::config::RepositoryConfig;

#[derive(Debug, Clone)]
pub struct ConfigStatusDto {
    pub config: RepositoryConfig,
    pub configured: bool,
    pub missing: Vec<&'static str>,
}

impl From<RepositoryConfig> for ConfigStatusDto {
    fn from(config: RepositoryConfig) -> Self {
        let missing = config.missing_fields();
        ConfigStatusDto {
            configured: missing.is_empty(),
            missing,
            config,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveConfigInput {
    pub username: String,
    pub repository: String,
    /// `None` keeps the token already on file.
    pub token: Option<String>,
    pub branch: Option<String>,
}
