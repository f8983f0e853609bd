//! # Tourex Server
//!
//! Tour booking HTTP server.
//!
//! ## Overview
//!
//! Tourex Server exposes the tour-update API, including image uploads:
//!
//! - **Tour Updates**: Partial updates over multipart form data
//! - **Image Lifecycle**: Uploaded images are transcoded to a canonical
//!   JPEG, durably stored, and old files are cleaned up only after the
//!   record stopped referencing them
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for persistent storage
//! - The `image` crate for transcoding
//! - A flat-file image store with path confinement

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourex_core::{
    ImageStore, TourImageService,
    database::{PostgresDatabase, PostgresTourRepository, TourRepository},
};
use tourex_server::{
    AppState,
    infra::config::Config,
    routes,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "tourex-server")]
#[command(about = "Tour booking server with resilient image lifecycle handling")]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Apply database schema and exit
    #[arg(long, default_value_t = false)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServeArgs::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(host) = args.host {
        config.server_host = host;
    }
    config
        .ensure_directories()
        .context("failed to create image directory")?;
    config
        .normalize_paths()
        .context("failed to canonicalize image directory")?;

    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be provided for PostgreSQL connections")?;

    let database = PostgresDatabase::new(&database_url)
        .await
        .context("failed to connect to PostgreSQL")?;
    database
        .initialize_schema()
        .await
        .context("failed to initialize database schema")?;
    if args.migrate {
        info!("database schema applied");
        return Ok(());
    }

    let store = ImageStore::new(&config.tour_image_dir);
    store
        .validate()
        .await
        .context("image store failed its startup probe")?;
    info!(dir = %config.tour_image_dir.display(), "image store ready");

    let tours: Arc<dyn TourRepository> =
        Arc::new(PostgresTourRepository::new(database.pool().clone()));
    let tour_images = Arc::new(TourImageService::new(Arc::clone(&tours), store));

    let config = Arc::new(config);
    let state = AppState::new(Arc::clone(&config), tours, tour_images);
    let app = routes::create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid server address")?;

    info!("Starting Tourex Server on {}", addr);
    if config.dev_mode {
        warn!("DEV_MODE is enabled");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind server address")?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("server terminated")?;

    Ok(())
}
