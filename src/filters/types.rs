//! The skip-types pass: remove attributes and methods whose types match a
//! disallowed pattern.

use crate::config::SkipTypes;
use crate::core::{ClassDesc, MethodSig, Registry};
use crate::core::types::TypeDescriptor;
use crate::matching::TypeMatcher;

/// Apply skip-type rules to every class in the registry. Global rules hit
/// every class; per-class rules only hit classes whose name is a key.
pub fn skip_types(rules: Option<&SkipTypes>, registry: &mut Registry) {
    let Some(rules) = rules else { return };
    log::info!("removing skipped types from the description registry");
    match rules {
        SkipTypes::Global(matchers) => {
            for desc in registry.classes_mut() {
                modify_desc(matchers, desc);
            }
        }
        SkipTypes::PerClass(by_class) => {
            for desc in registry.classes_mut() {
                if let Some(matchers) = by_class.get(&desc.name) {
                    modify_desc(matchers, desc);
                }
            }
        }
    }
}

/// Delete every attribute and method of `desc` that any matcher catches.
///
/// Deletions operate on key snapshots, never on a map being iterated. For
/// methods the return type is checked first; arguments are then scanned in
/// declared order with the matcher list as the inner loop, stopping at the
/// first match.
pub(crate) fn modify_desc(skips: &[TypeMatcher], desc: &mut ClassDesc) {
    let attr_names: Vec<String> = desc.attrs.keys().cloned().collect();
    for name in attr_names {
        let doomed = desc
            .attrs
            .get(&name)
            .is_some_and(|ty| skips.iter().any(|tm| tm.flatmatches(ty)));
        if doomed {
            desc.attrs.remove(&name);
            log::debug!("removed attribute {} from class {}", name, desc.name);
        }
    }

    let sigs: Vec<MethodSig> = desc.methods.keys().cloned().collect();
    for sig in sigs {
        let returns = desc.methods.get(&sig).and_then(Option::as_ref);
        if method_matches(skips, &sig, returns) {
            desc.methods.remove(&sig);
            log::debug!("removed method {} from class {}", sig.name, desc.name);
        }
    }
}

fn method_matches(
    skips: &[TypeMatcher],
    sig: &MethodSig,
    returns: Option<&TypeDescriptor>,
) -> bool {
    if let Some(ret) = returns {
        if skips.iter().any(|tm| tm.flatmatches(ret)) {
            return true;
        }
    }
    sig.args
        .iter()
        .any(|arg| skips.iter().any(|tm| tm.flatmatches(&arg.ty)))
}
