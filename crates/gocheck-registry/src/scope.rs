//! Lexical scopes.
//!
//! Scopes form a tree rooted at the universe: universe -> package -> file ->
//! function -> block. Each scope maps names to the objects declared directly
//! in it; resolution walks the parent chain.

use gocheck_core::{ObjectId, PackageId, ScopeId};
use rustc_hash::FxHashMap;

/// What introduced a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Universe,
    Package,
    /// Holds the file's imports.
    File,
    Function,
    Block,
}

/// One level of the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    /// Package owning this scope; `None` for the universe.
    pub pkg: Option<PackageId>,
    names: FxHashMap<String, ObjectId>,
    /// Declaration order, for deterministic iteration.
    order: Vec<ObjectId>,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>, kind: ScopeKind, pkg: Option<PackageId>) -> Self {
        Self {
            parent,
            kind,
            pkg,
            names: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Object declared directly in this scope under `name`.
    pub fn get(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Declared objects in declaration order.
    pub fn objects(&self) -> &[ObjectId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Scopes local to a function body, as opposed to package-level ones.
    pub fn is_local(&self) -> bool {
        matches!(self.kind, ScopeKind::Function | ScopeKind::Block)
    }

    /// Bind `name`; returns the previous binding if there was one.
    pub(crate) fn insert(&mut self, name: &str, obj: ObjectId) -> Option<ObjectId> {
        if let Some(existing) = self.names.get(name) {
            return Some(*existing);
        }
        self.names.insert(name.to_string(), obj);
        self.order.push(obj);
        None
    }
}
