//! The filtering passes and their orchestration.
//!
//! Five passes run in a fixed order over the same registry:
//! skip-types, skip-methods, skip-attrs, auto-skip, include-methods.
//! The order is a contract: the include allow-list runs last so it always
//! wins over anything earlier passes left behind, and auto-skip runs
//! registry-wide before it, so unknown-type methods are purged even inside
//! classes that carry an allow-list. Every pass is idempotent, so running
//! the whole pipeline twice changes nothing on the second run.

pub mod attrs;
pub mod auto;
pub mod include;
pub mod methods;
pub mod types;

pub use attrs::skip_attrs;
pub use auto::skip_auto;
pub use include::include_methods;
pub use methods::skip_methods;
pub use types::skip_types;

use crate::config::RuleSet;
use crate::core::Registry;
use crate::resolve::Canonicalize;

/// Run the full pipeline once, mutating the registry in place.
///
/// Rule normalization has already happened by the time this is called, so
/// nothing here can fail; unknown types and missing names are absorbed as
/// removals or log lines.
pub fn apply_filters(rules: &RuleSet, resolver: &dyn Canonicalize, registry: &mut Registry) {
    skip_types(rules.skip_types.as_ref(), registry);
    skip_methods(rules.skip_methods.as_ref(), registry);
    skip_attrs(rules.skip_attrs.as_ref(), registry);
    skip_auto(rules.skip_auto, resolver, registry);
    include_methods(rules.include_methods.as_ref(), registry);
}
