//! Type canonicalization: the seam between the filter engine and an
//! external type system.
//!
//! The engine only depends on the [`Canonicalize`] trait. The table-backed
//! [`KnownTypeResolver`] is the concrete implementation the CLI wires in,
//! built from a default scalar/template universe plus whatever the
//! configuration and the registry itself declare.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::TypesConfig;
use crate::core::errors::UnknownType;
use crate::core::types::TypeDescriptor;
use crate::core::Registry;

/// Resolve a type descriptor to canonical form, or signal that it is
/// unknown.
pub trait Canonicalize {
    fn canon(&self, ty: &TypeDescriptor) -> Result<TypeDescriptor, UnknownType>;
}

/// Scalar types known out of the box.
const SCALAR_TYPES: &[&str] = &[
    "bool",
    "char",
    "complex128",
    "float32",
    "float64",
    "int16",
    "int32",
    "int64",
    "str",
    "uchar",
    "uint16",
    "uint32",
    "uint64",
    "void",
];

/// Template heads known out of the box.
const TEMPLATE_TYPES: &[&str] = &["map", "pair", "set", "vector"];

/// A canonicalizer backed by lookup tables of known scalar names, known
/// template heads, and single-hop aliases.
#[derive(Debug, Clone, Default)]
pub struct KnownTypeResolver {
    known: BTreeSet<String>,
    templates: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
}

impl KnownTypeResolver {
    /// An empty resolver that knows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver primed with the default scalar and template universe.
    pub fn with_defaults() -> Self {
        let mut resolver = Self::new();
        for name in SCALAR_TYPES {
            resolver.known.insert((*name).to_string());
        }
        for head in TEMPLATE_TYPES {
            resolver.templates.insert((*head).to_string());
        }
        resolver
    }

    /// The default universe extended with a `[types]` config section.
    pub fn from_config(config: &TypesConfig) -> Self {
        let mut resolver = Self::with_defaults();
        for name in &config.known {
            resolver.register(name.clone());
        }
        for head in &config.templates {
            resolver.register_template(head.clone());
        }
        for (from, to) in &config.aliases {
            resolver.alias(from.clone(), to.clone());
        }
        resolver
    }

    pub fn register(&mut self, name: impl Into<String>) {
        self.known.insert(name.into());
    }

    pub fn register_template(&mut self, head: impl Into<String>) {
        self.templates.insert(head.into());
    }

    pub fn alias(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.aliases.insert(from.into(), to.into());
    }

    /// Make every class name in a registry resolvable, so descriptions may
    /// reference each other without tripping the auto-skip pass.
    pub fn learn_registry(&mut self, registry: &Registry) {
        for desc in registry.classes() {
            self.register(desc.name.clone());
        }
    }
}

impl Canonicalize for KnownTypeResolver {
    fn canon(&self, ty: &TypeDescriptor) -> Result<TypeDescriptor, UnknownType> {
        match ty {
            TypeDescriptor::Atom(name) => {
                let resolved = self.aliases.get(name).unwrap_or(name);
                if self.known.contains(resolved) {
                    Ok(TypeDescriptor::Atom(resolved.clone()))
                } else {
                    Err(UnknownType(name.clone()))
                }
            }
            TypeDescriptor::Qualified { inner, qualifier } => Ok(TypeDescriptor::Qualified {
                inner: Box::new(self.canon(inner)?),
                qualifier: *qualifier,
            }),
            TypeDescriptor::Parametrized { head, args } => {
                if !self.templates.contains(head) {
                    return Err(UnknownType(head.clone()));
                }
                let args = args
                    .iter()
                    .map(|arg| self.canon(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::Parametrized {
                    head: head.clone(),
                    args,
                })
            }
        }
    }
}
