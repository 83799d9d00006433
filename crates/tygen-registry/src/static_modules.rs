//! In-memory `ModuleSource`.
//!
//! Embedders (and tests) describe modules with the builder API: named type
//! definitions, function specs, the callables behind them, and whether the
//! module is a protocol.

use crate::source::{CallResult, ModuleSource, NativeFun};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tygen_ast::{FunSpec, TypeDef};
use tygen_common::{Atom, Error, Term};

pub struct StaticModule {
    name: Atom,
    types: Vec<TypeDef>,
    specs: FxHashMap<(Atom, u32), Vec<FunSpec>>,
    funs: FxHashMap<(Atom, u32), NativeFun>,
    protocol: bool,
}

impl StaticModule {
    pub fn new(name: &str) -> StaticModule {
        StaticModule {
            name: Atom::new(name),
            types: Vec::new(),
            specs: FxHashMap::default(),
            funs: FxHashMap::default(),
            protocol: false,
        }
    }

    pub fn with_type(mut self, def: TypeDef) -> StaticModule {
        self.types.push(def);
        self
    }

    pub fn with_spec(mut self, name: &str, spec: FunSpec) -> StaticModule {
        let key = (Atom::new(name), spec.arity());
        self.specs.entry(key).or_default().push(spec);
        self
    }

    pub fn with_fun(
        mut self,
        name: &str,
        arity: u32,
        fun: impl Fn(&[Term]) -> CallResult + Send + Sync + 'static,
    ) -> StaticModule {
        self.funs.insert((Atom::new(name), arity), Arc::new(fun));
        self
    }

    pub fn as_protocol(mut self) -> StaticModule {
        self.protocol = true;
        self
    }
}

/// A fixed set of modules.
pub struct StaticModules {
    modules: FxHashMap<Atom, StaticModule>,
}

impl StaticModules {
    pub fn new() -> StaticModules {
        StaticModules { modules: FxHashMap::default() }
    }

    pub fn add(&mut self, module: StaticModule) -> &mut StaticModules {
        self.modules.insert(module.name, module);
        self
    }

    fn get(&self, module: Atom) -> Result<&StaticModule, Error> {
        self.modules.get(&module).ok_or_else(|| Error::unknown_module(module))
    }
}

impl ModuleSource for StaticModules {
    fn lookup_types(&self, module: Atom) -> Result<Vec<TypeDef>, Error> {
        Ok(self.get(module)?.types.clone())
    }

    fn lookup_specs(&self, module: Atom, name: Atom, arity: u32) -> Result<Vec<FunSpec>, Error> {
        Ok(self
            .get(module)?
            .specs
            .get(&(name, arity))
            .cloned()
            .unwrap_or_default())
    }

    fn lookup_fun(&self, module: Atom, name: Atom, arity: u32) -> Result<NativeFun, Error> {
        self.get(module)?
            .funs
            .get(&(name, arity))
            .cloned()
            .ok_or_else(|| Error::missing_spec(module, name, arity))
    }

    fn is_protocol(&self, module: Atom) -> bool {
        self.modules.get(&module).map(|m| m.protocol).unwrap_or(false)
    }
}
