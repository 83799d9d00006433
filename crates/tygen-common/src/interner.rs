//! String interning for atoms.
//!
//! Atoms are interned symbolic names. Interning gives `Copy` identity
//! comparison and cheap hashing for names that are compared constantly
//! (type names, map keys, module names). The global interner is sharded
//! via `DashMap`, so concurrent interning from multiple call sites is
//! safe and idempotent.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::Lazy;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

static GLOBAL: Lazy<Interner> = Lazy::new(Interner::new);

/// An interned symbolic name.
///
/// Two atoms are equal iff they intern the same string. The numeric id is
/// only meaningful within the process.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl Atom {
    /// Interns `name` in the global interner.
    pub fn new(name: &str) -> Atom {
        GLOBAL.intern(name)
    }

    /// The interned string.
    pub fn as_str(self) -> Arc<str> {
        GLOBAL.resolve(self)
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Atom {
        Atom::new(name)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.as_str())
    }
}

impl serde::Serialize for Atom {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

/// Sharded string interner.
///
/// Both directions (name to id, id to name) are kept so resolution never
/// scans. Insertion uses the entry API, so two threads racing to intern the
/// same name observe the same id.
pub struct Interner {
    names: DashMap<Arc<str>, u32, FxBuildHasher>,
    rev: DashMap<u32, Arc<str>, FxBuildHasher>,
    next: AtomicU32,
}

impl Interner {
    pub fn new() -> Interner {
        Interner {
            names: DashMap::with_hasher(FxBuildHasher),
            rev: DashMap::with_hasher(FxBuildHasher),
            next: AtomicU32::new(0),
        }
    }

    pub fn intern(&self, name: &str) -> Atom {
        if let Some(id) = self.names.get(name) {
            return Atom(*id);
        }
        match self.names.entry(Arc::from(name)) {
            Entry::Occupied(occupied) => Atom(*occupied.get()),
            Entry::Vacant(vacant) => {
                let id = self.next.fetch_add(1, Ordering::Relaxed);
                self.rev.insert(id, vacant.key().clone());
                vacant.insert(id);
                Atom(id)
            }
        }
    }

    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.rev
            .get(&atom.0)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| Arc::from(""))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
