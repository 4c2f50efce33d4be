//! The auto-skip pass: remove anything whose types the canonicalizer
//! cannot resolve.

use crate::core::types::TypeDescriptor;
use crate::core::{MethodSig, Registry};
use crate::resolve::Canonicalize;

/// Canonicalize every attribute type and every method's return and argument
/// types across the whole registry; whatever fails is removed.
///
/// Removals are two-phase: each class is fully scanned into a blacklist
/// before anything is deleted. For methods the return type is tried first,
/// then arguments in declared order, stopping at the first unresolvable
/// type.
pub fn skip_auto(enabled: bool, resolver: &dyn Canonicalize, registry: &mut Registry) {
    if !enabled {
        return;
    }
    log::info!("removing descriptions that use unknown types");
    for desc in registry.classes_mut() {
        let mut doomed_attrs = Vec::new();
        for (name, ty) in &desc.attrs {
            if resolver.canon(ty).is_err() {
                log::warn!(
                    "removing attribute {} from class {} since it uses unknown type {}",
                    name,
                    desc.name,
                    ty
                );
                doomed_attrs.push(name.clone());
            }
        }
        for name in doomed_attrs {
            desc.attrs.remove(&name);
        }

        let mut doomed_methods = Vec::new();
        for (sig, returns) in &desc.methods {
            if let Some(offender) = first_unknown(resolver, sig, returns.as_ref()) {
                log::warn!(
                    "removing method {} from class {} since it uses unknown type {}",
                    sig.name,
                    desc.name,
                    offender
                );
                doomed_methods.push(sig.clone());
            }
        }
        for sig in doomed_methods {
            desc.methods.remove(&sig);
        }
    }
}

/// The first type site of the method the resolver rejects, if any.
fn first_unknown<'a>(
    resolver: &dyn Canonicalize,
    sig: &'a MethodSig,
    returns: Option<&'a TypeDescriptor>,
) -> Option<&'a TypeDescriptor> {
    if let Some(ret) = returns {
        if resolver.canon(ret).is_err() {
            return Some(ret);
        }
    }
    sig.args
        .iter()
        .map(|arg| &arg.ty)
        .find(|ty| resolver.canon(ty).is_err())
}
