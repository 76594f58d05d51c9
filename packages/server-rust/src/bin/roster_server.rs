//! Roster server binary.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use roster_server::logging::init_tracing;
use roster_server::{Cli, NetworkModule, RecordStoreFactory};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;

    let store = Arc::new(RecordStoreFactory::with_default_observers(cli.storage_config()).create());

    let mut module = NetworkModule::new(cli.network_config(), store);
    let port = module.start().await?;
    info!(port, records = module.store().len(), "roster server listening");

    module.serve(shutdown_signal()).await?;
    info!("roster server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
