use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    /// Loopback unless API_HOST says otherwise; the server holds a GitHub token
    /// and has no auth of its own.
    pub api_host: IpAddr,
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub data_dir: PathBuf,
    pub github_api_url: String,
    pub user_agent: String,
    pub upload_max_bytes: usize,
    pub static_dir: Option<PathBuf>,
    pub is_production: bool,
}

fn parse_api_host(raw: Option<&str>) -> anyhow::Result<IpAddr> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("API_HOST must be an IP address, got {v:?}")),
        None => Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_host = parse_api_host(env::var("API_HOST").ok().as_deref())?;
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8787);
        let frontend_url = env::var("FRONTEND_URL").ok();
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()));
        let github_api_url = env::var("GITHUB_API_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "https://api.github.com".into());
        let user_agent = format!("gitpush/{}", env!("CARGO_PKG_VERSION"));
        // GitHub caps content API writes well below this; base64 adds a third.
        let upload_max_bytes = env::var("UPLOAD_MAX_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25 * 1024 * 1024);
        let static_dir = env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        if is_production
            && !frontend_url
                .as_deref()
                .map(|u| u.starts_with("http"))
                .unwrap_or(false)
        {
            anyhow::bail!(
                "FRONTEND_URL must be set to a full origin in production (e.g., https://app.example.com)"
            );
        }
        if !(github_api_url.starts_with("http://") || github_api_url.starts_with("https://")) {
            anyhow::bail!("GITHUB_API_URL must be an http(s) URL");
        }

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            data_dir,
            github_api_url,
            user_agent,
            upload_max_bytes,
            static_dir,
            is_production,
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_host_defaults_to_loopback() {
        assert_eq!(parse_api_host(None).unwrap(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(parse_api_host(Some("  ")).unwrap(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn api_host_accepts_explicit_addresses() {
        assert_eq!(
            parse_api_host(Some("0.0.0.0")).unwrap(),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        );
        assert!(parse_api_host(Some("::1")).unwrap().is_loopback());
        assert!(parse_api_host(Some("localhost")).is_err());
    }
}
