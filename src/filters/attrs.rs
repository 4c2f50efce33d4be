//! The skip-attrs pass: remove attributes by exact name.

use std::collections::BTreeMap;

use crate::core::Registry;

/// For each named class, remove the listed attributes. Names match exactly;
/// an absent attribute is a warning, not an error.
pub fn skip_attrs(rules: Option<&BTreeMap<String, Vec<String>>>, registry: &mut Registry) {
    let Some(rules) = rules else { return };
    log::info!("removing skipped attributes from the description registry");
    for desc in registry.classes_mut() {
        let Some(names) = rules.get(&desc.name) else {
            continue;
        };
        for name in names {
            if desc.attrs.remove(name).is_some() {
                log::debug!("removed attribute {} from class {}", name, desc.name);
            } else {
                log::warn!(
                    "could not find attribute `{}` in class {}",
                    name,
                    desc.name
                );
            }
        }
    }
}
