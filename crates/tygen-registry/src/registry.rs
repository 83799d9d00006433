//! Per-module memoization over a `ModuleSource`.

use crate::source::{ModuleSource, NativeFun};
use dashmap::DashMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use std::sync::Arc;
use tygen_ast::{FunSpec, TypeDef};
use tygen_common::{Atom, Error};

/// The named definitions of one module, indexed by name and arity.
/// Immutable once populated.
pub struct ModuleTypes {
    defs: FxHashMap<(Atom, u32), TypeDef>,
    names: FxHashSet<Atom>,
}

impl ModuleTypes {
    fn from_defs(module: Atom, defs: Vec<TypeDef>) -> ModuleTypes {
        let mut table: FxHashMap<(Atom, u32), TypeDef> = FxHashMap::default();
        let mut names = FxHashSet::default();
        for def in defs {
            names.insert(def.name);
            let key = (def.name, def.arity() as u32);
            if table.contains_key(&key) {
                tracing::warn!(
                    "duplicate definition of {}.{}/{} ignored",
                    module,
                    def.name,
                    def.arity()
                );
                continue;
            }
            table.insert(key, def);
        }
        ModuleTypes { defs: table, names }
    }

    pub fn get(&self, name: Atom, arity: u32) -> Option<&TypeDef> {
        self.defs.get(&(name, arity))
    }

    pub fn has_name(&self, name: Atom) -> bool {
        self.names.contains(&name)
    }
}

/// Lazily populated, per-module view over a `ModuleSource`.
///
/// A module's definitions are fetched on first request and cached.
/// Concurrent first accesses may both consult the source; the entry API
/// makes the published table the same either way.
pub struct Registry {
    source: Arc<dyn ModuleSource>,
    modules: DashMap<Atom, Arc<ModuleTypes>, FxBuildHasher>,
}

impl Registry {
    pub fn new(source: Arc<dyn ModuleSource>) -> Registry {
        Registry { source, modules: DashMap::with_hasher(FxBuildHasher) }
    }

    pub fn from_source(source: impl ModuleSource + 'static) -> Registry {
        Registry::new(Arc::new(source))
    }

    /// The memoized definition table of `module`.
    pub fn module(&self, module: Atom) -> Result<Arc<ModuleTypes>, Error> {
        if let Some(cached) = self.modules.get(&module) {
            return Ok(cached.clone());
        }
        let defs = self.source.lookup_types(module)?;
        let table = Arc::new(ModuleTypes::from_defs(module, defs));
        let entry = self.modules.entry(module).or_insert(table);
        Ok(entry.clone())
    }

    /// Selects the definition of `module.name` whose parameter arity is
    /// `arity`. `UnknownType` when no definition carries the name at all,
    /// `WrongArity` when the name exists at other arities only.
    pub fn select(&self, module: Atom, name: Atom, arity: u32) -> Result<TypeDef, Error> {
        let types = self.module(module)?;
        match types.get(name, arity) {
            Some(def) => Ok(def.clone()),
            None if types.has_name(name) => {
                Err(Error::wrong_arity(module, name, arity as usize))
            }
            None => Err(Error::unknown_type(module, name)),
        }
    }

    pub fn specs(&self, module: Atom, name: Atom, arity: u32) -> Result<Vec<FunSpec>, Error> {
        self.source.lookup_specs(module, name, arity)
    }

    pub fn fun(&self, module: Atom, name: Atom, arity: u32) -> Result<NativeFun, Error> {
        self.source.lookup_fun(module, name, arity)
    }

    pub fn is_protocol(&self, module: Atom) -> bool {
        self.source.is_protocol(module)
    }
}
