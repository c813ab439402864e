//! ytgate API Server
//!
//! HTTP front for yt-dlp: metadata, direct URLs and server-side downloads
//! behind a static bearer token, plus file serving through either the bearer
//! token or time-limited signed links.

mod auth;
mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use ytgate_downloader::YtDlp;
use ytgate_shared::capability::{UrlSigner, UrlVerifier, DOWNLOAD_FILE_PATH};
use ytgate_shared::config::GateConfig;
use ytgate_shared::errors::GateResult;
use ytgate_shared::gateway::AccessGateway;
use ytgate_shared::storage::Storage;
use ytgate_shared::token_auth::BearerAuth;

/// Shared application state for all API handlers. Read-only after startup.
pub struct AppState {
    pub gateway: AccessGateway,
    pub signer: UrlSigner,
    pub storage: Storage,
    pub ytdlp: YtDlp,
}

impl AppState {
    pub fn from_config(config: &GateConfig) -> GateResult<Self> {
        Ok(Self {
            gateway: AccessGateway::new(
                BearerAuth::new(config.api_token.clone()),
                UrlVerifier::new(&config.signing_key)?,
            ),
            signer: UrlSigner::new(&config.signing_key)?,
            storage: Storage::open_root(&config.download_dir)?,
            ytdlp: YtDlp::from_config(config),
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Bearer-protected
        .route("/info", get(routes::info))
        .route("/direct-url", get(routes::direct_url))
        .route("/download", post(routes::download))
        .route("/download-signed", post(routes::download_signed))
        // Signed link or bearer
        .route(DOWNLOAD_FILE_PATH, get(routes::download_file))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ytgate_api=info,ytgate_shared=info,ytgate_downloader=info,tower_http=info".into()
            }),
        )
        .init();

    let config = GateConfig::from_env()?;
    info!(
        "Config: download_dir={} cookies={} tool={} timeout={}s",
        config.download_dir.display(),
        config.cookies_path.display(),
        config.ytdlp_bin,
        config.ytdlp_timeout_secs
    );

    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let addr = config.bind_addr();
    info!("ytgate API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
