//! Pod template labels and the scaling directive they may carry

use std::collections::{BTreeMap, HashMap};

use faas_common::{FUNCTION_NAME_LABEL, SCALE_MIN_LABEL, UPDATE_TOKEN_LABEL};
use tracing::{debug, warn};

use crate::tag::TagGenerator;

/// Labels for the pod template plus any replica override they request
#[derive(Clone, Debug, PartialEq)]
pub struct MergedLabels {
    /// Complete label map for the pod template
    pub labels: BTreeMap<String, String>,
    /// Replica count requested via `com.openfaas.scale.min`
    pub min_replicas: Option<i32>,
}

/// Merge system labels with user labels
///
/// Starts from a fresh map holding a new update token, overlays every user
/// label, then writes the function name last. The `faas_function` label must
/// match the Deployment selector, so a user label with that key is dropped.
/// A `com.openfaas.scale.min` label sets
/// `min_replicas` only when it parses as a positive integer; any other value
/// is kept as a label and otherwise ignored.
///
/// faas-netes applied the override only when parsing *failed*
/// (`err != nil && v > 0`), which never fires. Here the override applies on a
/// successful positive parse.
pub fn merge_labels<T>(
    service: &str,
    user_labels: Option<&HashMap<String, String>>,
    tags: &T,
) -> MergedLabels
where
    T: TagGenerator + ?Sized,
{
    let mut labels = BTreeMap::new();
    labels.insert(UPDATE_TOKEN_LABEL.to_string(), tags.next_tag());

    let mut min_replicas = None;
    for (key, value) in user_labels.into_iter().flatten() {
        if key == SCALE_MIN_LABEL {
            min_replicas = parse_min_replicas(service, value);
        }
        if key == FUNCTION_NAME_LABEL && value != service {
            warn!(
                service = %service,
                value = %value,
                "ignoring user label that would rename the function"
            );
        }
        labels.insert(key.clone(), value.clone());
    }

    labels.insert(FUNCTION_NAME_LABEL.to_string(), service.to_string());

    MergedLabels {
        labels,
        min_replicas,
    }
}

fn parse_min_replicas(service: &str, value: &str) -> Option<i32> {
    match value.parse::<i32>() {
        Ok(n) if n > 0 => Some(n),
        Ok(n) => {
            debug!(
                service = %service,
                value = n,
                "non-positive scale.min, leaving replicas unchanged"
            );
            None
        }
        Err(e) => {
            warn!(
                service = %service,
                value = %value,
                error = %e,
                "ignoring unparseable scale.min label"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> String {
        "42".to_string()
    }

    fn user(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_system_labels_seeded() {
        let merged = merge_labels("echo", None, &fixed);
        assert_eq!(merged.labels.len(), 2);
        assert_eq!(merged.labels[FUNCTION_NAME_LABEL], "echo");
        assert_eq!(merged.labels[UPDATE_TOKEN_LABEL], "42");
        assert_eq!(merged.min_replicas, None);
    }

    #[test]
    fn test_user_labels_overlaid() {
        let labels = user(&[("team", "infra"), ("tier", "web")]);
        let merged = merge_labels("echo", Some(&labels), &fixed);
        assert_eq!(merged.labels.len(), 4);
        assert_eq!(merged.labels["team"], "infra");
        assert_eq!(merged.labels[FUNCTION_NAME_LABEL], "echo");
    }

    #[test]
    fn test_user_label_cannot_rename_function() {
        let labels = user(&[(FUNCTION_NAME_LABEL, "other"), ("team", "infra")]);
        let merged = merge_labels("echo", Some(&labels), &fixed);
        assert_eq!(merged.labels[FUNCTION_NAME_LABEL], "echo");
        assert_eq!(merged.labels["team"], "infra");
        assert_eq!(merged.labels.len(), 3);
    }

    #[test]
    fn test_user_label_may_replace_update_token() {
        let labels = user(&[(UPDATE_TOKEN_LABEL, "pinned")]);
        let merged = merge_labels("echo", Some(&labels), &fixed);
        assert_eq!(merged.labels[UPDATE_TOKEN_LABEL], "pinned");
    }

    #[test]
    fn test_scale_min_sets_replicas() {
        let labels = user(&[(SCALE_MIN_LABEL, "5")]);
        let merged = merge_labels("echo", Some(&labels), &fixed);
        assert_eq!(merged.min_replicas, Some(5));
        assert_eq!(merged.labels[SCALE_MIN_LABEL], "5");
    }

    /// Regression: faas-netes overrode replicas only on a *failed* parse.
    /// An unparseable value must leave replicas alone and keep the label.
    #[test]
    fn test_unparseable_scale_min_is_ignored() {
        let labels = user(&[(SCALE_MIN_LABEL, "abc")]);
        let merged = merge_labels("echo", Some(&labels), &fixed);
        assert_eq!(merged.min_replicas, None);
        assert_eq!(merged.labels[SCALE_MIN_LABEL], "abc");
    }

    #[test]
    fn test_non_positive_scale_min_is_ignored() {
        for value in ["0", "-3"] {
            let labels = user(&[(SCALE_MIN_LABEL, value)]);
            let merged = merge_labels("echo", Some(&labels), &fixed);
            assert_eq!(merged.min_replicas, None, "value {value}");
        }
    }

    #[test]
    fn test_fresh_token_per_merge() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let counter = AtomicU32::new(0);
        let tags = move || counter.fetch_add(1, Ordering::SeqCst).to_string();

        let first = merge_labels("echo", None, &tags);
        let second = merge_labels("echo", None, &tags);
        assert_ne!(
            first.labels[UPDATE_TOKEN_LABEL],
            second.labels[UPDATE_TOKEN_LABEL]
        );
    }
}
