//! Function update provider for Kubernetes
//!
//! Serves `PUT /system/functions`, applying function update requests to the
//! Deployments in the function namespace.
//!
//! # Modules
//!
//! - [`config`] - Flags and environment
//! - [`telemetry`] - Tracing subscriber setup
//! - [`client`] - Deployment reads and writes
//! - [`retry`] - Backoff for conflicting writes
//! - [`handler`] - HTTP routes

#![deny(missing_docs)]

pub mod client;
pub mod config;
pub mod handler;
pub mod retry;
pub mod telemetry;

pub use config::Config;
pub use handler::{router, GatewayState};
