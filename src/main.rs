use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use gitpush::application::ports::config_store::ConfigStore;
use gitpush::application::ports::history_store::HistoryStore;
use gitpush::application::ports::repository_content::RepositoryContentPort;
use gitpush::application::services::history::UploadHistory;
use gitpush::bootstrap::app_context::{AppContext, AppServices};
use gitpush::bootstrap::config::Config;
use gitpush::infrastructure::github::ReqwestGitHubContents;
use gitpush::infrastructure::storage::{JsonConfigStore, JsonHistoryStore};
use gitpush::presentation::http::cors::cors_layer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            gitpush::presentation::http::health::health,
            gitpush::presentation::http::config::get_config,
            gitpush::presentation::http::config::save_config,
            gitpush::presentation::http::uploads::upload_file,
            gitpush::presentation::http::history::list_history,
            gitpush::presentation::http::history::clear_history,
            gitpush::presentation::http::contents::list_contents,
            gitpush::presentation::http::contents::get_file,
            gitpush::presentation::http::explorer::get_explorer,
            gitpush::presentation::http::explorer::submit_path,
            gitpush::presentation::http::explorer::select_entry,
            gitpush::presentation::http::explorer::retry,
            gitpush::presentation::http::explorer::reset,
        ),
        components(schemas(
            gitpush::presentation::http::error::ErrorResponse,
            gitpush::presentation::http::health::HealthResp,
            gitpush::presentation::http::config::RepositoryConfigResponse,
            gitpush::presentation::http::config::SaveConfigRequest,
            gitpush::presentation::http::uploads::UploadResponse,
            gitpush::presentation::http::uploads::UploadMultipart,
            gitpush::presentation::http::history::UploadRecordResponse,
            gitpush::presentation::http::contents::EntryResponse,
            gitpush::presentation::http::contents::PreviewBodyResponse,
            gitpush::presentation::http::contents::PreviewResponse,
            gitpush::presentation::http::contents::ContentsResponse,
            gitpush::presentation::http::contents::FileResponse,
            gitpush::presentation::http::explorer::ExplorerViewResponse,
            gitpush::presentation::http::explorer::ExplorerPathRequest,
        )),
        tags(
            (name = "Health", description = "System health checks"),
            (name = "Config", description = "Repository settings"),
            (name = "Uploads", description = "Create or update files in the repository"),
            (name = "History", description = "Upload history"),
            (name = "Contents", description = "Repository contents"),
            (name = "Explorer", description = "Path-driven repository browsing")
        )
    )]
struct ApiDoc;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
    info!("shutdown_requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "gitpush=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting GitPush backend");

    if let Err(e) = tokio::fs::create_dir_all(&cfg.data_dir).await {
        tracing::warn!(error = ?e, dir = %cfg.data_dir.display(), "Failed to create data dir");
    }

    let config_store: Arc<dyn ConfigStore> = Arc::new(JsonConfigStore::new(cfg.config_file()));
    let history_store: Arc<dyn HistoryStore> = Arc::new(JsonHistoryStore::new(cfg.history_file()));
    let contents: Arc<dyn RepositoryContentPort> = Arc::new(ReqwestGitHubContents::new(
        &cfg.github_api_url,
        &cfg.user_agent,
    )?);
    let history = Arc::new(UploadHistory::new(history_store));

    let services = AppServices::new(config_store, contents, history);
    let ctx = AppContext::new(cfg.clone(), services);

    let mut app = Router::new()
        .nest("/api", gitpush::presentation::http::health::routes())
        .nest("/api", gitpush::presentation::http::config::routes(ctx.clone()))
        .nest("/api", gitpush::presentation::http::uploads::routes(ctx.clone()))
        .nest("/api", gitpush::presentation::http::history::routes(ctx.clone()))
        .nest("/api", gitpush::presentation::http::contents::routes(ctx.clone()))
        .nest("/api", gitpush::presentation::http::explorer::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = &cfg.static_dir {
        info!(dir = %dir.display(), "Serving static front end");
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app
        .layer(cors_layer(&cfg))
        // Multipart framing needs headroom above the file limit itself.
        .layer(DefaultBodyLimit::max(cfg.upload_max_bytes + 64 * 1024))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::new(cfg.api_host, cfg.api_port);
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
