use colored::Colorize;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::infrastructure::{ProvisioningConfig, ServiceProvider};

pub async fn run(config: ProvisioningConfig) {
    let cancellation = CancellationToken::new();
    let service_provider = match ServiceProvider::build(&config, cancellation.clone()).await {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {e:#}", "Cannot build Service Provider".red());
        }
    };
    if let Err(e) = service_provider.database.ensure_schema().await {
        return error!("Cannot prepare database schema: {e:#}");
    }

    let handles = service_provider
        .background_services
        .iter()
        .cloned()
        .map(|task| tokio::spawn(async move { task.run().await }))
        .collect::<Vec<_>>();
    info!("Provisioning system started");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for shutdown signal: {e}");
    }
    info!("Stopping services (ctrl-c handling).");
    cancellation.cancel();
    for result in join_all(handles).await {
        if let Err(e) = result {
            error!("Background service ended abnormally: {e}");
        }
    }
    info!("Provisioning system stopped");
}
