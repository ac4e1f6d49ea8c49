//! Application entry point for the `farmconnect-sensors` service.
//!
//! Startup sequence:
//! - Load configuration from environment variables or `.env`
//! - Initialize structured logging/tracing
//! - Select the tree store: PostgreSQL when `DATABASE_URL` is set (creating
//!   the schema if needed), otherwise an in-memory tree
//! - Mount the API routes via the `routes` gateway
//! - Bind the Axum HTTP server and serve requests
//!
//! # Environment Variables
//! - `DATABASE_URL` (optional) – PostgreSQL connection string
//! - `DB_POOL_MAX` (optional) – maximum number of DB connections (default: 5)
//! - `LISTEN_ADDR` (optional) – bind address (default: `0.0.0.0:8080`)
//! - `REPORT_LIST_LIMIT` (optional) – default report page size (default: 10)
//! - `SENSORS_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `SENSORS_SPAN_EVENTS` (optional) – span event mode for tracing
use std::env;

use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

use farmconnect_sensors::{config, routes, schema, AnalysisService, MemoryTree, PgTree};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let app: Router = match cfg.db_url.as_deref() {
        Some(db_url) => {
            tracing::info!("Attempting to connect to database");

            let pool = PgPoolOptions::new()
                .max_connections(cfg.db_pool_max)
                .connect(db_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

            tracing::info!("Successfully connected to database");
            schema::create_schema(&pool).await?;

            let service = AnalysisService::new(PgTree::new(pool))
                .with_default_limit(cfg.report_list_limit);
            routes::router(service)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; readings and reports are kept in memory only");
            let service = AnalysisService::new(MemoryTree::new())
                .with_default_limit(cfg.report_list_limit);
            routes::router(service)
        }
    };

    tracing::info!("Listening on {}", cfg.listen_addr);

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Install the process-wide log subscriber.
///
/// With nothing configured the service logs at `debug`, keeps sqlx query
/// logging at `warn`, and emits a CLOSE event per span so request timings show
/// up next to the ingestion and report logs. `RUST_LOG` replaces the whole
/// filter; `SENSORS_LOG_LEVEL` only changes the base level.
/// `SENSORS_SPAN_EVENTS=full|enter_exit` adds span entry/exit events.
/// Colour follows the terminal unless `FORCE_COLOR` says otherwise.
fn init_tracing() {
    // ---
    let span_events = match env::var("SENSORS_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("SENSORS_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},sqlx::query=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
