//! Update reconciliation
//!
//! Combines an update request with the Deployment read from the API server
//! into the Deployment to write back. Image, env, node selector, resources and
//! labels are replaced wholesale; nothing from the previous values survives.
//!
//! Reconciliation is pure. Concurrent updates of the same function race at
//! the API server; callers must serialize them or retry on conflict around
//! the whole fetch, reconcile, submit sequence.

use faas_common::{Error, FunctionDeployment, PULL_ALWAYS};
use k8s_openapi::api::apps::v1::Deployment;
use tracing::{debug, instrument};

use crate::deployment::{PodTemplateExt, PrimaryContainer};
use crate::env::build_env_vars;
use crate::labels::merge_labels;
use crate::resources::build_resources;
use crate::selector::build_node_selector;
use crate::tag::{ClockTagGenerator, TagGenerator};

/// Computes updated Deployments from function update requests
#[derive(Clone, Debug, Default)]
pub struct UpdateReconciler<T = ClockTagGenerator> {
    tags: T,
}

impl UpdateReconciler {
    /// Create a reconciler whose update tokens come from the wall clock
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: TagGenerator> UpdateReconciler<T> {
    /// Create a reconciler with a custom update token source
    pub fn with_tags(tags: T) -> Self {
        Self { tags }
    }

    /// Apply `request` to `deployment`
    ///
    /// Every fallible step runs before the Deployment is touched, so an error
    /// never leaves a half-updated object behind.
    #[instrument(skip_all, fields(service = %request.service))]
    pub fn reconcile(
        &self,
        request: &FunctionDeployment,
        mut deployment: Deployment,
    ) -> Result<Deployment, Error> {
        request.validate()?;

        let node_selector = build_node_selector(request.constraints())?;
        let resources = build_resources(request.limits.as_ref(), request.requests.as_ref())?;
        let merged = merge_labels(&request.service, request.labels.as_ref(), &self.tags);

        match deployment.primary_container_mut() {
            Some(container) => {
                container.image = (!request.image.is_empty()).then(|| request.image.clone());
                container.image_pull_policy = Some(PULL_ALWAYS.to_string());
                container.env = Some(build_env_vars(
                    request.env_process.as_deref(),
                    request.env_vars.as_ref(),
                ));
                container.resources = resources;
            }
            None => debug!("deployment has no containers, skipping container fields"),
        }

        deployment.pod_spec_mut().node_selector = Some(node_selector);
        deployment.set_template_labels(merged.labels);

        if let Some(replicas) = merged.min_replicas {
            debug!(replicas, "applying scale.min replica override");
            deployment.set_replicas(replicas);
        }

        Ok(deployment)
    }
}
