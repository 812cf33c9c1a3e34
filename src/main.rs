use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealdesk::config::Config;
use dealdesk::db::{AppState, create_pool, init_db, seed_fixtures};
use dealdesk::handlers;

#[derive(Parser, Debug)]
#[command(name = "dealdesk")]
#[command(about = "Organizations, accounts and deals over SQLite")]
struct Cli {
    /// Wipe the database and load the demo organizations, accounts and deals (dev mode only)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (dev mode only, useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,
}

fn seed_dev_data(state: &AppState) {
    let conn = state.db.get().expect("Failed to get db connection for seeding");
    let summary = seed_fixtures(&conn).expect("Failed to seed fixture data");

    tracing::info!("============================================");
    tracing::info!("FIXTURE DATA SEEDED");
    tracing::info!("Organizations: {}", summary.organizations);
    tracing::info!("Accounts:      {}", summary.accounts);
    tracing::info!("Deals:         {}", summary.deals);
    tracing::info!("============================================");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dealdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }

    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    let state = AppState { db: db_pool };

    if cli.seed {
        if !config.dev_mode {
            tracing::warn!("--seed flag ignored: not in dev mode (set DEALDESK_ENV=dev)");
        } else {
            seed_dev_data(&state);
        }
    }

    if config.cors_allowed_origins.is_empty() {
        tracing::info!("CORS: any origin allowed");
    } else {
        tracing::info!("CORS: allowed origins {:?}", config.cors_allowed_origins);
    }

    let app = handlers::router()
        .layer(handlers::cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    let cleanup_on_exit = cli.ephemeral && config.dev_mode;
    if cli.ephemeral && !config.dev_mode {
        tracing::warn!("--ephemeral flag ignored: not in dev mode (set DEALDESK_ENV=dev)");
    }
    if cleanup_on_exit {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::info!("dealdesk listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    if cleanup_on_exit {
        let db_path = &config.database_path;
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        } else {
            tracing::info!("Removed {}", db_path);
        }
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
