#![allow(dead_code)]

use bindfilter::{ClassDesc, DescEntry, MethodSig, Param, Registry, TypeDescriptor};

pub fn atom(name: &str) -> TypeDescriptor {
    TypeDescriptor::atom(name)
}

pub fn vector_of(elem: TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor::parametrized("vector", [elem])
}

pub fn param(name: &str, ty: TypeDescriptor) -> Param {
    Param::new(name, ty)
}

pub fn method(name: &str, args: Vec<Param>) -> MethodSig {
    MethodSig::new(name, args)
}

pub struct ClassBuilder {
    desc: ClassDesc,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            desc: ClassDesc::new(name),
        }
    }

    pub fn attr(mut self, name: &str, ty: TypeDescriptor) -> Self {
        self.desc.attrs.insert(name.to_string(), ty);
        self
    }

    pub fn method(mut self, sig: MethodSig, returns: Option<TypeDescriptor>) -> Self {
        self.desc.methods.insert(sig, returns);
        self
    }

    /// A no-argument method returning void, the common case in scenarios.
    pub fn simple_method(self, name: &str) -> Self {
        self.method(MethodSig::new(name, vec![]), Some(TypeDescriptor::atom("void")))
    }

    pub fn build(self) -> ClassDesc {
        self.desc
    }
}

/// A single-module registry holding the given classes, keyed by class name.
pub fn registry_of(classes: Vec<ClassDesc>) -> Registry {
    let mut registry = Registry::new();
    for desc in classes {
        let key = desc.name.clone();
        registry.insert("pack", &key, DescEntry::Class(desc));
    }
    registry
}
