//! Compiled type patterns with containment-or-exact matching semantics.

use crate::core::errors::FilterError;
use crate::core::types::{TypeDescriptor, TypeExpr};

/// How a matcher compares its pattern against candidates.
///
/// Derived structurally from the pattern: a bare atom matches by
/// any-depth containment, any compound pattern matches by structural
/// equality. One rule list can therefore blacklist a primitive everywhere
/// and surgically target one exact signature shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Contains,
    Exact,
}

/// A compiled pattern over type descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMatcher {
    pattern: TypeDescriptor,
    mode: MatchMode,
}

impl TypeMatcher {
    pub fn new(pattern: TypeDescriptor) -> Self {
        let mode = match pattern {
            TypeDescriptor::Atom(_) => MatchMode::Contains,
            _ => MatchMode::Exact,
        };
        Self { pattern, mode }
    }

    /// Compile a raw surface expression. Fails with
    /// [`FilterError::MalformedPattern`] on shapes the type grammar rejects.
    pub fn from_expr(expr: &TypeExpr) -> Result<Self, FilterError> {
        Ok(Self::new(TypeDescriptor::parse(expr)?))
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn pattern(&self) -> &TypeDescriptor {
        &self.pattern
    }

    /// Does this pattern match the candidate?
    ///
    /// `Contains` mode checks membership of the pattern atom in the
    /// candidate's flattened identifier set; `Exact` mode checks structural
    /// equality. Pure function of (pattern, candidate).
    pub fn flatmatches(&self, candidate: &TypeDescriptor) -> bool {
        match (self.mode, &self.pattern) {
            (MatchMode::Contains, TypeDescriptor::Atom(name)) => {
                candidate.flatten().contains(name.as_str())
            }
            _ => candidate == &self.pattern,
        }
    }
}
