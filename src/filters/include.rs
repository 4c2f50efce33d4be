//! The include-methods pass: keep only an explicit allow-list of methods.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::Registry;

/// For each named class, rebuild the methods map keeping only signatures
/// whose name is in the keep set. Matching is by method name, so every
/// overload of a kept name survives. Runs last in the pipeline, so the
/// allow-list wins regardless of what earlier passes kept.
pub fn include_methods(
    rules: Option<&BTreeMap<String, BTreeSet<String>>>,
    registry: &mut Registry,
) {
    let Some(rules) = rules else { return };
    log::info!("removing all methods not named by an include list");
    for desc in registry.classes_mut() {
        let Some(keep) = rules.get(&desc.name) else {
            continue;
        };
        let methods = std::mem::take(&mut desc.methods);
        desc.methods = methods
            .into_iter()
            .filter(|(sig, _)| keep.contains(&sig.name))
            .collect();
    }
}
