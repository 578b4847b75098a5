//! Deployment access for the update path
//!
//! Reads the stored Deployment of a function and writes the reconciled one
//! back with a full replace, so the API server rejects the write with 409 if
//! the object changed since it was read.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Api, PostParams};
use kube::Client;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use faas_common::Error;

/// Trait abstracting Deployment reads and writes
///
/// Lets the handler be tested without a cluster.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeploymentClient: Send + Sync {
    /// Get the Deployment backing a function, `None` if it doesn't exist
    async fn get_deployment(&self, name: &str) -> Result<Option<Deployment>, Error>;

    /// Replace a Deployment with its updated version
    async fn replace_deployment(&self, deployment: &Deployment) -> Result<(), Error>;
}

/// Real Kubernetes client implementation scoped to the function namespace
pub struct KubeDeploymentClient {
    client: Client,
    namespace: String,
}

impl KubeDeploymentClient {
    /// Create a client for Deployments in `namespace`
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    fn api(&self) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }
}

#[async_trait]
impl DeploymentClient for KubeDeploymentClient {
    async fn get_deployment(&self, name: &str) -> Result<Option<Deployment>, Error> {
        match self.api().get(name).await {
            Ok(deployment) => Ok(Some(deployment)),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace_deployment(&self, deployment: &Deployment) -> Result<(), Error> {
        let name = deployment_name(deployment)?;

        match self
            .api()
            .replace(name, &PostParams::default(), deployment)
            .await
        {
            Ok(_) => {
                debug!(namespace = %self.namespace, deployment = %name, "replaced deployment");
                Ok(())
            }
            Err(kube::Error::Api(ae)) if ae.code == 409 => Err(Error::conflict(name, ae.message)),
            Err(e) => Err(Error::submission(name, e.to_string())),
        }
    }
}

/// Name to replace under; a nameless Deployment is a server-side fault
fn deployment_name(deployment: &Deployment) -> Result<&str, Error> {
    deployment
        .metadata
        .name
        .as_deref()
        .ok_or_else(|| Error::submission("<unnamed>", "deployment has no name"))
}
