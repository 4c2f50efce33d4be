//! The description registry data model: modules mapping to class and
//! function descriptions, as produced by an external description builder
//! and consumed by a downstream generator.

pub mod errors;
pub mod types;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::TypeDescriptor;

/// One declared parameter of a method signature.
///
/// Defaults are carried as opaque literal strings; they participate in
/// signature identity so overloads differing only in defaults stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A method name plus its ordered, typed parameter list. Overloads sharing
/// a name are distinguished by their parameter lists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodSig {
    pub name: String,
    pub args: Vec<Param>,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, args: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Structured metadata for one class: typed attributes and typed method
/// signatures. The method value is the return type, `None` for
/// constructor-like methods without one.
///
/// Methods are keyed by full signature in a `BTreeMap`, so every scan over
/// them is deterministic (sorted by name, then parameter list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClassDescRepr", into = "ClassDescRepr")]
pub struct ClassDesc {
    pub name: String,
    pub attrs: BTreeMap<String, TypeDescriptor>,
    pub methods: BTreeMap<MethodSig, Option<TypeDescriptor>>,
}

impl ClassDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }

    /// Names of methods currently present, overloads included once each.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(|sig| sig.name.as_str())
    }
}

/// JSON representation of a class description. Methods serialize as a list
/// of records because signatures are compound keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassDescRepr {
    name: String,
    #[serde(default)]
    attrs: BTreeMap<String, TypeDescriptor>,
    #[serde(default)]
    methods: Vec<MethodRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MethodRecord {
    name: String,
    #[serde(default)]
    args: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    returns: Option<TypeDescriptor>,
}

impl TryFrom<ClassDescRepr> for ClassDesc {
    type Error = String;

    fn try_from(repr: ClassDescRepr) -> Result<Self, Self::Error> {
        let mut methods = BTreeMap::new();
        for record in repr.methods {
            let sig = MethodSig::new(record.name, record.args);
            if methods.insert(sig.clone(), record.returns).is_some() {
                return Err(format!(
                    "duplicate method signature `{}` in class `{}`",
                    sig.name, repr.name
                ));
            }
        }
        Ok(ClassDesc {
            name: repr.name,
            attrs: repr.attrs,
            methods,
        })
    }
}

impl From<ClassDesc> for ClassDescRepr {
    fn from(desc: ClassDesc) -> Self {
        ClassDescRepr {
            name: desc.name,
            attrs: desc.attrs,
            methods: desc
                .methods
                .into_iter()
                .map(|(sig, returns)| MethodRecord {
                    name: sig.name,
                    args: sig.args,
                    returns,
                })
                .collect(),
        }
    }
}

/// A free-function description. Carried through the registry untouched;
/// filtering only acts on class descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDesc {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<TypeDescriptor>,
}

/// One entry of a module's description map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DescEntry {
    Class(ClassDesc),
    Function(FuncDesc),
}

impl DescEntry {
    pub fn is_class(&self) -> bool {
        matches!(self, DescEntry::Class(_))
    }

    pub fn as_class(&self) -> Option<&ClassDesc> {
        match self {
            DescEntry::Class(desc) => Some(desc),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassDesc> {
        match self {
            DescEntry::Class(desc) => Some(desc),
            _ => None,
        }
    }
}

/// The mutable collection of descriptions being filtered, keyed by module
/// and then by entry name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    pub modules: BTreeMap<String, BTreeMap<String, DescEntry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: &str, key: &str, entry: DescEntry) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(key.to_string(), entry);
    }

    /// Every class description in the registry, in deterministic order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDesc> {
        self.modules
            .values()
            .flat_map(|module| module.values())
            .filter_map(DescEntry::as_class)
    }

    pub fn classes_mut(&mut self) -> impl Iterator<Item = &mut ClassDesc> {
        self.modules
            .values_mut()
            .flat_map(|module| module.values_mut())
            .filter_map(DescEntry::as_class_mut)
    }

    /// Look up a class by its canonical target name.
    pub fn class(&self, name: &str) -> Option<&ClassDesc> {
        self.classes().find(|desc| desc.name == name)
    }
}
