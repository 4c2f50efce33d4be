//! The skip-methods pass: remove methods by name prefix.

use std::collections::BTreeMap;

use crate::core::Registry;

/// For each named class, remove one method per listed prefix.
///
/// Prefixes match method names with `starts_with`, and each prefix entry
/// removes exactly one signature (the first in sorted signature order), so
/// one rule never wipes a whole overload set. A prefix that matches nothing
/// is a warning, not an error.
pub fn skip_methods(rules: Option<&BTreeMap<String, Vec<String>>>, registry: &mut Registry) {
    let Some(rules) = rules else { return };
    log::info!("removing skipped methods from the description registry");
    for desc in registry.classes_mut() {
        let Some(prefixes) = rules.get(&desc.name) else {
            continue;
        };
        for prefix in prefixes {
            let found = desc
                .methods
                .keys()
                .find(|sig| sig.name.starts_with(prefix.as_str()))
                .cloned();
            match found {
                Some(sig) => {
                    desc.methods.remove(&sig);
                    log::debug!("removed method {} from class {}", sig.name, desc.name);
                }
                None => log::warn!(
                    "could not find a method matching `{}` in class {}",
                    prefix,
                    desc.name
                ),
            }
        }
    }
}
