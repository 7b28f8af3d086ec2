use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::bootstrap::config::Config;

/// Cross-origin policy for the browser front end. With FRONTEND_URL only that
/// origin is allowed; without it only loopback origins (a dev server on
/// localhost) are. Same-origin requests need no CORS at all.
pub fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        // Production without a valid FRONTEND_URL is rejected by Config::from_env.
        _ if cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        _ => base.allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin.to_str().map(is_loopback_origin).unwrap_or(false)
        })),
    }
}

/// `http(s)://localhost`, `127.0.0.1` or `[::1]`, with any port.
pub fn is_loopback_origin(origin: &str) -> bool {
    let Some(authority) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    let host = if let Some(rest) = authority.strip_prefix('[') {
        match rest.split_once(']') {
            Some((host, port)) if port.is_empty() || port.starts_with(':') => host,
            _ => return false,
        }
    } else {
        match authority.split_once(':') {
            Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
                host
            }
            Some(_) => return false,
            None => authority,
        }
    };
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_origins_are_recognised() {
        assert!(is_loopback_origin("http://localhost:5173"));
        assert!(is_loopback_origin("http://127.0.0.1:8787"));
        assert!(is_loopback_origin("https://localhost"));
        assert!(is_loopback_origin("http://[::1]:3000"));
    }

    #[test]
    fn other_origins_are_rejected() {
        assert!(!is_loopback_origin("https://evil.example"));
        assert!(!is_loopback_origin("http://localhost.evil.example"));
        assert!(!is_loopback_origin("http://localhost:80@evil.example"));
        assert!(!is_loopback_origin("http://192.168.1.20:8787"));
        assert!(!is_loopback_origin("null"));
        assert!(!is_loopback_origin("file://localhost"));
    }

    fn config(frontend_url: Option<&str>) -> Config {
        Config {
            api_host: std::net::IpAddr::from([127, 0, 0, 1]),
            api_port: 0,
            frontend_url: frontend_url.map(str::to_string),
            data_dir: "./data".into(),
            github_api_url: "https://api.github.com".into(),
            user_agent: "gitpush-test".into(),
            upload_max_bytes: 1024,
            static_dir: None,
            is_production: false,
        }
    }

    async fn allowed_origin(cfg: &Config, origin: &str) -> Option<String> {
        let app = axum::Router::new()
            .route("/api/health", axum::routing::get(|| async { "ok" }))
            .layer(cors_layer(cfg));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let resp = reqwest::Client::new()
            .get(format!("http://{addr}/api/health"))
            .header("origin", origin)
            .send()
            .await
            .unwrap();
        server.abort();
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[tokio::test]
    async fn without_frontend_url_foreign_origins_are_not_mirrored() {
        let cfg = config(None);
        assert_eq!(
            allowed_origin(&cfg, "http://localhost:5173").await.as_deref(),
            Some("http://localhost:5173")
        );
        assert_eq!(allowed_origin(&cfg, "https://evil.example").await, None);
    }

    #[tokio::test]
    async fn frontend_url_is_the_only_allowed_origin() {
        let cfg = config(Some("https://app.example.com"));
        assert_eq!(
            allowed_origin(&cfg, "https://app.example.com").await.as_deref(),
            Some("https://app.example.com")
        );
        assert_ne!(
            allowed_origin(&cfg, "http://localhost:5173").await.as_deref(),
            Some("http://localhost:5173")
        );
    }
}
