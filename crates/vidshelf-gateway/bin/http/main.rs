mod cli;

use crate::cli::{LogFormatArg, StorageBackendArg, CLI};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vidshelf_catalog::CatalogService;
use vidshelf_gateway::{App, AppState};
use vidshelf_storage::{InMemoryRepository, MySqlRepository, Repository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::try_parse()?;

    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryRepository::new()).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let repository = match config.mysql_max_connections {
                Some(max) => MySqlRepository::connect_with_max_connections(&mysql_dsn, max).await?,
                None => MySqlRepository::connect(&mysql_dsn).await?,
            };
            run_server(config.listen_addr, repository).await?;
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormatArg::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormatArg::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn run_server<R: Repository>(
    listen_addr: SocketAddr,
    repository: R,
) -> Result<(), std::io::Error> {
    let state = AppState::new(Arc::new(CatalogService::new(repository)));
    let router = App::router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
