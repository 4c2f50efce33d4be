//! The recursive type-descriptor model shared by rule patterns and
//! description registries.
//!
//! Descriptors are finite immutable trees with structural equality. The
//! surface form (used both in configuration values and in registry JSON) is
//! a bare string for an atom or a nested sequence for compound types; see
//! [`TypeExpr`] for the grammar.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::errors::FilterError;

/// Qualification markers that may wrap a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    Const,
    Ref,
    Ptr,
}

impl Qualifier {
    /// The surface token this qualifier is written as.
    pub fn token(self) -> &'static str {
        match self {
            Qualifier::Const => "const",
            Qualifier::Ref => "&",
            Qualifier::Ptr => "*",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "const" => Some(Qualifier::Const),
            "&" => Some(Qualifier::Ref),
            "*" => Some(Qualifier::Ptr),
            _ => None,
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A parsed type: an atomic identifier, a qualified wrapper, or a
/// parametrized container applied to argument types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeDescriptor {
    Atom(String),
    Qualified {
        inner: Box<TypeDescriptor>,
        qualifier: Qualifier,
    },
    Parametrized {
        head: String,
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn atom(name: impl Into<String>) -> Self {
        TypeDescriptor::Atom(name.into())
    }

    pub fn qualified(inner: TypeDescriptor, qualifier: Qualifier) -> Self {
        TypeDescriptor::Qualified {
            inner: Box::new(inner),
            qualifier,
        }
    }

    pub fn parametrized(
        head: impl Into<String>,
        args: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        TypeDescriptor::Parametrized {
            head: head.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Parse a surface expression into a descriptor.
    ///
    /// The grammar: a bare identifier is an atom; a sequence whose last
    /// element is a qualifier token (`const`, `&`, `*`) qualifies the rest of
    /// the sequence; any other sequence is a parametrized type whose first
    /// element must be an identifier head. The flattened form
    /// `("vector", "float64", "const")` and the nested form
    /// `(("vector", "float64"), "const")` parse to the same descriptor.
    pub fn parse(expr: &TypeExpr) -> Result<Self, FilterError> {
        match expr {
            TypeExpr::Ident(name) => Ok(TypeDescriptor::Atom(name.clone())),
            TypeExpr::Seq(items) => Self::parse_seq(expr, items),
        }
    }

    fn parse_seq(whole: &TypeExpr, items: &[TypeExpr]) -> Result<Self, FilterError> {
        if items.len() < 2 {
            return Err(FilterError::malformed(
                whole,
                "a compound type needs at least two elements",
            ));
        }
        if let TypeExpr::Ident(last) = &items[items.len() - 1] {
            if let Some(qualifier) = Qualifier::from_token(last) {
                let rest = &items[..items.len() - 1];
                let inner = if rest.len() == 1 {
                    Self::parse(&rest[0])?
                } else {
                    Self::parse_seq(whole, rest)?
                };
                return Ok(TypeDescriptor::qualified(inner, qualifier));
            }
        }
        let head = match &items[0] {
            TypeExpr::Ident(head) => head.clone(),
            TypeExpr::Seq(_) => {
                return Err(FilterError::malformed(
                    whole,
                    "the head of a parametrized type must be an identifier",
                ))
            }
        };
        let args = items[1..]
            .iter()
            .map(Self::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeDescriptor::Parametrized { head, args })
    }

    /// Collect every atomic identifier reachable in this tree, descending
    /// through qualifiers and into parametrization heads and arguments.
    /// Qualifier tokens participate in the result.
    pub fn flatten(&self) -> BTreeSet<&str> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            TypeDescriptor::Atom(name) => {
                out.insert(name.as_str());
            }
            TypeDescriptor::Qualified { inner, qualifier } => {
                out.insert(qualifier.token());
                inner.collect_atoms(out);
            }
            TypeDescriptor::Parametrized { head, args } => {
                out.insert(head.as_str());
                for arg in args {
                    arg.collect_atoms(out);
                }
            }
        }
    }

    fn to_expr(&self) -> TypeExpr {
        match self {
            TypeDescriptor::Atom(name) => TypeExpr::Ident(name.clone()),
            TypeDescriptor::Qualified { inner, qualifier } => TypeExpr::Seq(vec![
                inner.to_expr(),
                TypeExpr::Ident(qualifier.token().to_string()),
            ]),
            TypeDescriptor::Parametrized { head, args } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(TypeExpr::Ident(head.clone()));
                items.extend(args.iter().map(Self::to_expr));
                TypeExpr::Seq(items)
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_expr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expr = TypeExpr::deserialize(deserializer)?;
        TypeDescriptor::parse(&expr).map_err(serde::de::Error::custom)
    }
}

/// The raw surface form of a type, exactly as it appears in configuration
/// values and registry JSON: an identifier or an arbitrarily nested
/// sequence. Parsing into a [`TypeDescriptor`] is where malformed shapes
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    Ident(String),
    Seq(Vec<TypeExpr>),
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) => f.write_str(name),
            TypeExpr::Seq(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}
