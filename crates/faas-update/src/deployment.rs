//! Accessors over the parts of a Deployment an update touches
//!
//! A Deployment with zero containers is degenerate but can be read back from
//! the API server; container fields are then skipped rather than indexed.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Container, PodSpec};

/// Access to the first container of a workload's pod template
pub trait PrimaryContainer {
    /// Mutable access to the first container, `None` when the pod template
    /// has no containers
    fn primary_container_mut(&mut self) -> Option<&mut Container>;
}

impl PrimaryContainer for Deployment {
    fn primary_container_mut(&mut self) -> Option<&mut Container> {
        self.spec
            .as_mut()?
            .template
            .spec
            .as_mut()?
            .containers
            .first_mut()
    }
}

/// Pod-template level fields of a Deployment
pub(crate) trait PodTemplateExt {
    /// Pod spec, created empty if missing
    fn pod_spec_mut(&mut self) -> &mut PodSpec;

    /// Replace the pod template labels
    fn set_template_labels(&mut self, labels: BTreeMap<String, String>);

    /// Set the desired replica count
    fn set_replicas(&mut self, replicas: i32);
}

impl PodTemplateExt for Deployment {
    fn pod_spec_mut(&mut self) -> &mut PodSpec {
        self.spec
            .get_or_insert_with(Default::default)
            .template
            .spec
            .get_or_insert_with(Default::default)
    }

    fn set_template_labels(&mut self, labels: BTreeMap<String, String>) {
        self.spec
            .get_or_insert_with(Default::default)
            .template
            .metadata
            .get_or_insert_with(Default::default)
            .labels = Some(labels);
    }

    fn set_replicas(&mut self, replicas: i32) {
        self.spec.get_or_insert_with(Default::default).replicas = Some(replicas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::DeploymentSpec;
    use k8s_openapi::api::core::v1::PodTemplateSpec;

    fn with_containers(names: &[&str]) -> Deployment {
        Deployment {
            spec: Some(DeploymentSpec {
                template: PodTemplateSpec {
                    spec: Some(PodSpec {
                        containers: names
                            .iter()
                            .map(|n| Container {
                                name: n.to_string(),
                                ..Default::default()
                            })
                            .collect(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_container_is_primary() {
        let mut deployment = with_containers(&["echo", "sidecar"]);
        let primary = deployment.primary_container_mut().unwrap();
        assert_eq!(primary.name, "echo");
    }

    #[test]
    fn test_no_containers() {
        let mut deployment = with_containers(&[]);
        assert!(deployment.primary_container_mut().is_none());
    }

    #[test]
    fn test_missing_spec() {
        let mut deployment = Deployment::default();
        assert!(deployment.primary_container_mut().is_none());
    }

    #[test]
    fn test_pod_template_setters_fill_missing_parts() {
        let mut deployment = Deployment::default();
        deployment.set_replicas(3);
        deployment.set_template_labels(BTreeMap::from([("a".to_string(), "b".to_string())]));
        deployment.pod_spec_mut().node_selector = Some(BTreeMap::new());

        let spec = deployment.spec.unwrap();
        assert_eq!(spec.replicas, Some(3));
        assert_eq!(
            spec.template.metadata.unwrap().labels.unwrap()["a"],
            "b"
        );
        assert!(spec.template.spec.unwrap().node_selector.is_some());
    }
}
