//! Shared types for the function update path
//!
//! Holds the wire format of an update request, the error taxonomy shared by
//! the reconciler and the gateway, and the label/env conventions the OpenFaaS
//! gateway and watchdog rely on.

#![deny(missing_docs)]

pub mod error;
pub mod request;

pub use error::Error;
pub use request::{FunctionDeployment, FunctionResources};

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Label and Environment Conventions
// =============================================================================

/// Label carrying the function name; the Deployment selector matches on it
pub const FUNCTION_NAME_LABEL: &str = "faas_function";

/// Label carrying a per-update token so every update changes the pod template
pub const UPDATE_TOKEN_LABEL: &str = "uid";

/// Label requesting a minimum replica count for the function
pub const SCALE_MIN_LABEL: &str = "com.openfaas.scale.min";

/// Environment variable the watchdog reads to find the process to fork
pub const ENV_PROCESS_VAR: &str = "fprocess";

/// Image pull policy forced on every update so reused tags are refetched
pub const PULL_ALWAYS: &str = "Always";
