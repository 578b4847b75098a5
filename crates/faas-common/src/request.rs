//! Function update request as sent by the gateway
//!
//! Fields this path does not act on (secrets, annotations, namespace, ...)
//! are accepted and ignored so that full deploy payloads can be replayed as
//! updates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Desired state of a deployed function
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeployment {
    /// Name of the function; also the name of its Deployment
    pub service: String,

    /// Fully-qualified container image. Empty means no image configured.
    #[serde(default)]
    pub image: String,

    /// Overrides the `fprocess` environment variable for the watchdog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_process: Option<String>,

    /// Environment variables for the function runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_vars: Option<HashMap<String, String>>,

    /// Placement constraints of the form `key=value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,

    /// User labels applied to the pod template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,

    /// Resource limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<FunctionResources>,

    /// Resource requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<FunctionResources>,
}

/// CPU and memory quantities for limits or requests
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FunctionResources {
    /// Memory quantity (e.g., "128Mi")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    /// CPU quantity (e.g., "100m")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
}

impl FunctionDeployment {
    /// Decode a request body
    pub fn from_json(body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(body).map_err(|e| Error::decode(e.to_string()))
    }

    /// Reject requests that cannot name a target workload
    pub fn validate(&self) -> Result<(), Error> {
        if self.service.trim().is_empty() {
            return Err(Error::invalid_request("service name is required"));
        }
        Ok(())
    }

    /// Constraints, or an empty slice when none were sent
    pub fn constraints(&self) -> &[String] {
        self.constraints.as_deref().unwrap_or_default()
    }
}

impl FunctionResources {
    /// Memory quantity, treating an empty string as unset
    pub fn memory(&self) -> Option<&str> {
        self.memory.as_deref().filter(|m| !m.is_empty())
    }

    /// CPU quantity, treating an empty string as unset
    pub fn cpu(&self) -> Option<&str> {
        self.cpu.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_gateway_payload() {
        let body = br#"{
            "service": "echo",
            "image": "repo/echo:2",
            "network": "func_functions",
            "envProcess": "cat",
            "envVars": {"A": "1"},
            "constraints": ["zone=us-east"],
            "secrets": ["api-key"],
            "labels": {"team": "infra"},
            "annotations": {"topic": "orders"},
            "limits": {"memory": "128Mi", "cpu": "500m"},
            "requests": {"memory": "64Mi"},
            "readOnlyRootFilesystem": true
        }"#;

        let req = FunctionDeployment::from_json(body).unwrap();
        assert_eq!(req.service, "echo");
        assert_eq!(req.image, "repo/echo:2");
        assert_eq!(req.env_process.as_deref(), Some("cat"));
        assert_eq!(req.constraints(), ["zone=us-east".to_string()]);
        assert_eq!(req.limits.as_ref().and_then(|l| l.cpu()), Some("500m"));
        assert_eq!(req.requests.as_ref().and_then(|r| r.cpu()), None);
    }

    #[test]
    fn test_decode_minimal_payload() {
        let req = FunctionDeployment::from_json(br#"{"service": "echo"}"#).unwrap();
        assert_eq!(req.image, "");
        assert!(req.constraints().is_empty());
        assert!(req.labels.is_none());
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = FunctionDeployment::from_json(b"not json").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));

        let err = FunctionDeployment::from_json(b"").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_validate_requires_service() {
        let req = FunctionDeployment {
            service: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(Error::InvalidRequest { .. })));

        let req = FunctionDeployment {
            service: "echo".to_string(),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_quantities_read_as_unset() {
        let res = FunctionResources {
            memory: Some(String::new()),
            cpu: Some("1".to_string()),
        };
        assert_eq!(res.memory(), None);
        assert_eq!(res.cpu(), Some("1"));
    }
}
