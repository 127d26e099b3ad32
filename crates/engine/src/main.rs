//! Questgate Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use questgate_engine::{
    api,
    infrastructure::{
        app_settings::StatusEngineSettings, clock::SystemClock, file_source::FileQuestSource,
    },
    App,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "questgate_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Questgate Engine");

    // Load configuration
    let data_dir = std::env::var("QUESTGATE_DATA_DIR").unwrap_or_else(|_| "./data".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);
    let settings = StatusEngineSettings::from_env();
    tracing::info!(
        data_dir = %data_dir,
        cache_ttl_secs = settings.cache_ttl_secs(),
        max_traversal_depth = settings.max_traversal_depth(),
        promote_satisfied_locked = settings.promote_satisfied_locked(),
        excluded_profile_prefixes = ?settings.excluded_profile_prefixes(),
        "Status engine configured"
    );

    let source = Arc::new(FileQuestSource::new(data_dir));

    // Create application
    let app = Arc::new(App::new(
        source.clone(),
        source,
        Arc::new(SystemClock::new()),
        settings,
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<axum::http::HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| axum::http::HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS set but no origin parsed, CORS disabled");
        return None;
    }

    Some(cors.allow_origin(origins))
}
