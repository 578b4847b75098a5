//! Gateway configuration from flags and environment

use std::net::SocketAddr;

use clap::Parser;

use crate::retry::RetryConfig;
use crate::telemetry::LogFormat;

/// Function update provider for Kubernetes
#[derive(Parser, Debug, Clone)]
#[command(name = "faas-gateway", version, about, long_about = None)]
pub struct Config {
    /// Namespace holding function Deployments
    #[arg(long, env = "FUNCTION_NAMESPACE", default_value = "openfaas-fn")]
    pub namespace: String,

    /// Port for the HTTP API
    #[arg(long, env = "PORT", default_value_t = 8081)]
    pub port: u16,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Attempts per update when the Deployment changes underneath us
    #[arg(long, env = "UPDATE_MAX_ATTEMPTS", default_value_t = 3)]
    pub update_max_attempts: u32,
}

impl Config {
    /// Address the HTTP server binds to
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Retry policy for conflicting updates
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::with_max_attempts(self.update_max_attempts)
    }
}
