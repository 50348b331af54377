//! md-reader server binary.
//!
//! Loads configuration, picks the document store (PostgreSQL when a
//! database URL is configured, in-memory otherwise), and serves the API.

use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use md_reader::adapters::http::{api_router, DocumentAppState};
use md_reader::adapters::{
    HtmlPreviewRenderer, InMemoryDocumentRepository, PdfLayout, PdfRenderer,
    PostgresDocumentRepository, WordRenderer,
};
use md_reader::config::{AppConfig, DatabaseConfig, ServerConfig};
use md_reader::ports::DocumentRepository;

const REQUEST_ID_HEADER: http::HeaderName = http::HeaderName::from_static("x-request-id");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let repository = document_repository(&config.database).await?;

    let (width, height) = config.export.page_size.dimensions_mm();
    let layout = PdfLayout::new(width, height, config.export.margin_mm);

    let state = DocumentAppState {
        repository,
        quota_policy: Arc::new(config.quota.policy()),
        renderers: vec![
            Arc::new(PdfRenderer::new(layout)),
            Arc::new(WordRenderer::new()),
        ],
        previewer: Arc::new(HtmlPreviewRenderer::new()),
    };

    let app = api_router()
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        document_limit = config.quota.default_limit,
        "md-reader listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Env filter from `RUST_LOG` if set, else the configured level. JSON in production.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn document_repository(
    database: &DatabaseConfig,
) -> Result<Arc<dyn DocumentRepository>, Box<dyn std::error::Error>> {
    let Some(url) = database.url() else {
        tracing::warn!("no database configured; documents are kept in memory only");
        return Ok(Arc::new(InMemoryDocumentRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .max_lifetime(database.max_lifetime())
        .connect(url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    Ok(Arc::new(PostgresDocumentRepository::new(pool)))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
        .expose_headers([axum::http::header::CONTENT_DISPOSITION])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
