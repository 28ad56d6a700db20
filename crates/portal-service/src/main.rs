//! Knowledge-portal API server binary.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use portal_query::MySqlSource;
use portal_service::{router, AppState, RateLimiter};
use sqlx::mysql::MySqlPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
const RATE_LIMIT_MAX_REQUESTS: u32 = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool_size = std::env::var("PORTAL_POOL_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_POOL_SIZE);

    tracing::info!(pool_size, "connecting to database");
    let pool = MySqlPoolOptions::new()
        .max_connections(pool_size)
        .connect(&database_url)
        .await?;

    let state = AppState {
        source: Arc::new(MySqlSource::new(pool)),
        limiter: Arc::new(RateLimiter::new(RATE_LIMIT_WINDOW, RATE_LIMIT_MAX_REQUESTS)),
    };

    let port = std::env::var("PORTAL_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("starting knowledge-portal API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
