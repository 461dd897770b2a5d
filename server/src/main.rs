//! truecrime-server エントリーポイント

use clap::Parser;
use truecrime_server::{api, cli, config, db, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .envは任意
    let dotenv = dotenvy::dotenv();

    logging::init()?;
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let cli = cli::Cli::parse();
    let config = config::server_config_from_env();

    let db_pool = db::migrations::initialize_database(&config.database_url).await?;

    if let Some(command) = cli.command {
        let result = cli::run(command, &db_pool).await;
        db::migrations::close_database(&db_pool).await;
        return Ok(result?);
    }

    info!("True crime server v{}", env!("CARGO_PKG_VERSION"));

    if config.seed_catalog {
        let inserted = db::seed::seed_catalog(&db_pool).await?;
        info!("Catalog seeded with {} entries", inserted);
    }

    let router = api::create_router(AppState {
        db_pool: db_pool.clone(),
    });

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing database");
    db::migrations::close_database(&db_pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
