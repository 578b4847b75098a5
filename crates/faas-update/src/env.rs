//! Container environment from request env vars
//!
//! Output is sorted by name so the same request always renders the same
//! Deployment.

use std::collections::{BTreeMap, HashMap};

use faas_common::ENV_PROCESS_VAR;
use k8s_openapi::api::core::v1::EnvVar;

/// Build the container environment
///
/// A non-empty `env_process` becomes the `fprocess` variable and takes
/// precedence over an `fprocess` entry in `env_vars`.
pub fn build_env_vars(
    env_process: Option<&str>,
    env_vars: Option<&HashMap<String, String>>,
) -> Vec<EnvVar> {
    let mut sorted: BTreeMap<&str, &str> = env_vars
        .into_iter()
        .flatten()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    if let Some(process) = env_process.filter(|p| !p.is_empty()) {
        sorted.insert(ENV_PROCESS_VAR, process);
    }

    sorted
        .into_iter()
        .map(|(name, value)| EnvVar {
            name: name.to_string(),
            value: Some(value.to_string()),
            ..Default::default()
        })
        .collect()
}
