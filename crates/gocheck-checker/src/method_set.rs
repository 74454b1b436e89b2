//! Method sets.
//!
//! The method set of a type is the set of methods callable on a value of
//! that type. Methods declared with a pointer receiver belong to the method
//! set of `*T` but not of `T`; methods promoted through embedded fields are
//! included unless shadowed by a shallower member of the same name or
//! colliding with another member at the same depth.
//!
//! Selectors are resolved by [`lookup_field_or_method`](crate::lookup_field_or_method);
//! method sets answer the tooling question "what can I call on this?".

use std::fmt;

use gocheck_core::predicates::{deref, is_interface, ptr_recv};
use gocheck_core::{ObjectId, PackageId, Symbols, Type, TypeId, is_exported};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::info::{Selection, SelectionKind};
use crate::lookup::{Embedded, consolidate_multiples};

/// Identity of a member name: unexported names are qualified by package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Key {
    name: String,
    pkg: Option<PackageId>,
}

impl Key {
    fn new(name: &str, pkg: Option<PackageId>) -> Self {
        Self {
            name: name.to_string(),
            pkg: if is_exported(name) { None } else { pkg },
        }
    }

    fn of<S: Symbols + ?Sized>(symbols: &S, obj: ObjectId) -> Self {
        let obj = symbols.object(obj);
        Self::new(&obj.name, obj.pkg)
    }
}

/// An ordered set of method selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSet {
    list: Vec<(Key, Selection)>,
}

impl MethodSet {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The selection for method `name` as seen from package `pkg`.
    pub fn lookup(&self, pkg: Option<PackageId>, name: &str) -> Option<&Selection> {
        let key = Key::new(name, pkg);
        self.list
            .binary_search_by(|(k, _)| k.cmp(&key))
            .ok()
            .map(|i| &self.list[i].1)
    }

    /// Selections in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.list.iter().map(|(_, sel)| sel)
    }

    /// Method names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|(k, _)| k.name.as_str())
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MethodSet {")?;
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {name}")?;
        }
        f.write_str(" }")
    }
}

/// `None` marks a collision: the name is taken but nothing is selectable.
type Candidates = FxHashMap<Key, Option<Selection>>;

/// Compute the method set of `ty`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn method_set<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> MethodSet {
    let (base_ty, is_ptr) = deref(symbols, ty);
    if is_ptr && is_interface(symbols, base_ty) {
        return MethodSet::default();
    }

    let mut base: Candidates = FxHashMap::default();
    let mut current = vec![Embedded::root(base_ty, is_ptr)];
    let mut seen: FxHashSet<TypeId> = FxHashSet::default();

    while !current.is_empty() {
        let mut next: Vec<Embedded> = Vec::new();
        let mut methods: Candidates = FxHashMap::default();
        let mut fields: FxHashMap<Key, Option<ObjectId>> = FxHashMap::default();

        for entry in &current {
            let mut typ = entry.ty;
            if let Type::Named(named) = symbols.ty(typ) {
                if !seen.insert(typ) {
                    continue;
                }
                add_methods(symbols, &mut methods, ty, &named.methods, entry, entry.indirect);
                typ = named.underlying;
            }

            match symbols.ty(typ) {
                Type::Struct(st) => {
                    for (i, &field) in st.fields.iter().enumerate() {
                        let key = Key::of(symbols, field);
                        if !entry.multiples && !fields.contains_key(&key) {
                            fields.insert(key, Some(field));
                        } else {
                            fields.insert(key, None);
                        }
                        let f = symbols.object(field);
                        if f.is_embedded()
                            && let Some(fty) = f.ty()
                        {
                            let (fty, is_ptr) = deref(symbols, fty);
                            next.push(Embedded {
                                ty: fty,
                                index: entry.path_to(i),
                                indirect: entry.indirect || is_ptr,
                                multiples: entry.multiples,
                            });
                        }
                    }
                }
                Type::Interface(iface) => {
                    add_methods(symbols, &mut methods, ty, &iface.methods, entry, true);
                }
                _ => {}
            }
        }

        // Methods at this depth fill names still free; a field of the same
        // name at this depth turns the method into a collision.
        for (key, method) in methods {
            if !base.contains_key(&key) {
                let method = if fields.contains_key(&key) { None } else { method };
                base.insert(key, method);
            }
        }
        // Fields hide every method further down.
        for key in fields.into_keys() {
            base.entry(key).or_insert(None);
        }

        current = consolidate_multiples(symbols, next);
    }

    let mut list: Vec<(Key, Selection)> = base
        .into_iter()
        .filter_map(|(key, sel)| sel.map(|sel| (key, sel)))
        .collect();
    list.sort_by(|(a, _), (b, _)| a.cmp(b));
    trace!(methods = list.len(), "computed method set");
    MethodSet { list }
}

fn add_methods<S: Symbols + ?Sized>(
    symbols: &S,
    set: &mut Candidates,
    recv: TypeId,
    methods: &[ObjectId],
    entry: &Embedded,
    indirect: bool,
) {
    for (i, &method) in methods.iter().enumerate() {
        let key = Key::of(symbols, method);
        if !entry.multiples && !set.contains_key(&key) && (indirect || !ptr_recv(symbols, method)) {
            set.insert(
                key,
                Some(Selection {
                    kind: SelectionKind::MethodVal,
                    recv,
                    object: method,
                    path: entry.path_to(i),
                    indirect,
                }),
            );
        } else {
            set.insert(key, None);
        }
    }
}
