//! Node selector from placement constraints

use std::collections::BTreeMap;

use faas_common::Error;

/// Build a node selector from `key=value` constraints
///
/// Splits on the first `=`. Whitespace around key and value is trimmed. A
/// constraint without `=` or with an empty key fails the update instead of
/// being dropped, so typos surface to the operator. Later constraints win on
/// duplicate keys.
pub fn build_node_selector(constraints: &[String]) -> Result<BTreeMap<String, String>, Error> {
    let mut selector = BTreeMap::new();

    for constraint in constraints {
        let Some((key, value)) = constraint.split_once('=') else {
            return Err(Error::invalid_constraint(
                constraint,
                "expected the form key=value",
            ));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_constraint(constraint, "key must not be empty"));
        }

        selector.insert(key.to_string(), value.trim().to_string());
    }

    Ok(selector)
}
