//! Resource requirements for the function container

use std::collections::BTreeMap;

use faas_common::{Error, FunctionResources};
use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use crate::quantity::parse_quantity;

/// Build container resource requirements from request limits and requests
///
/// Returns `Ok(None)` when neither section sets anything. Any invalid quantity
/// fails the whole build; partial requirements are never returned.
pub fn build_resources(
    limits: Option<&FunctionResources>,
    requests: Option<&FunctionResources>,
) -> Result<Option<ResourceRequirements>, Error> {
    let limits = build_section("limits", limits)?;
    let requests = build_section("requests", requests)?;

    if limits.is_none() && requests.is_none() {
        return Ok(None);
    }

    Ok(Some(ResourceRequirements {
        limits,
        requests,
        ..Default::default()
    }))
}

fn build_section(
    section: &str,
    resources: Option<&FunctionResources>,
) -> Result<Option<BTreeMap<String, Quantity>>, Error> {
    let Some(resources) = resources else {
        return Ok(None);
    };

    let mut quantities = BTreeMap::new();
    for (name, value) in [("memory", resources.memory()), ("cpu", resources.cpu())] {
        let Some(value) = value else { continue };
        let qty = parse_quantity(value).map_err(|e| {
            Error::malformed_quantity(format!("{section}.{name}"), value, e.to_string())
        })?;
        quantities.insert(name.to_string(), qty);
    }

    Ok((!quantities.is_empty()).then_some(quantities))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(memory: Option<&str>, cpu: Option<&str>) -> FunctionResources {
        FunctionResources {
            memory: memory.map(String::from),
            cpu: cpu.map(String::from),
        }
    }

    #[test]
    fn test_absent_sections_yield_none() {
        assert_eq!(build_resources(None, None).unwrap(), None);
    }

    #[test]
    fn test_empty_sections_yield_none() {
        let empty = res(None, Some(""));
        assert_eq!(build_resources(Some(&empty), Some(&empty)).unwrap(), None);
    }

    #[test]
    fn test_limits_and_requests() {
        let limits = res(Some("128Mi"), Some("500m"));
        let requests = res(Some("64Mi"), None);

        let reqs = build_resources(Some(&limits), Some(&requests))
            .unwrap()
            .expect("requirements should be set");

        let lim = reqs.limits.expect("limits should be set");
        assert_eq!(lim.get("memory"), Some(&Quantity("128Mi".to_string())));
        assert_eq!(lim.get("cpu"), Some(&Quantity("500m".to_string())));

        let req = reqs.requests.expect("requests should be set");
        assert_eq!(req.get("memory"), Some(&Quantity("64Mi".to_string())));
        assert!(!req.contains_key("cpu"));
    }

    #[test]
    fn test_only_requests_leaves_limits_unset() {
        let requests = res(None, Some("1"));
        let reqs = build_resources(None, Some(&requests)).unwrap().unwrap();
        assert!(reqs.limits.is_none());
        assert!(reqs.requests.is_some());
    }

    #[test]
    fn test_bad_memory_limit_names_field() {
        let limits = res(Some("bad-value"), None);
        let err = build_resources(Some(&limits), None).unwrap_err();
        match err {
            Error::MalformedResourceQuantity { field, value, .. } => {
                assert_eq!(field, "limits.memory");
                assert_eq!(value, "bad-value");
            }
            other => panic!("expected MalformedResourceQuantity, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_cpu_request_names_field() {
        let limits = res(Some("128Mi"), None);
        let requests = res(None, Some("lots"));
        let err = build_resources(Some(&limits), Some(&requests)).unwrap_err();
        assert!(
            matches!(err, Error::MalformedResourceQuantity { ref field, .. } if field == "requests.cpu")
        );
    }
}
