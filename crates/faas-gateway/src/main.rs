//! faas-gateway - applies function updates to Kubernetes Deployments

use std::sync::Arc;

use clap::Parser;
use kube::Client;
use tracing::info;

use faas_gateway::client::KubeDeploymentClient;
use faas_gateway::telemetry::init_tracing;
use faas_gateway::{router, Config, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_format)?;

    let client = Client::try_default()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))?;

    let deployments = KubeDeploymentClient::new(client, &config.namespace);
    let state = Arc::new(GatewayState::new(
        Arc::new(deployments),
        config.retry_config(),
    ));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, namespace = %config.namespace, "faas-gateway listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("faas-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
