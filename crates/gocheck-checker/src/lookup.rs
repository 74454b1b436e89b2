//! Field and method lookup.
//!
//! [`lookup_field_or_method`] is the one place that decides which member a
//! selector `x.name` denotes. It walks the embedding graph breadth first, one
//! depth at a time, so a member at a shallower depth shadows every member of
//! the same name further down, and two members at the same depth are an
//! ambiguity.

use gocheck_core::predicates::{deref, identical, is_interface};
use gocheck_core::{ObjectId, PackageId, Symbols, Type, TypeId};
use rustc_hash::FxHashSet;
use tracing::trace;

/// A member found by lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub object: ObjectId,
    /// Embedded field indices walked, ending with the member's own index.
    pub path: Vec<usize>,
    /// A pointer was dereferenced on the way, including on the base itself.
    pub indirect: bool,
}

/// Outcome of [`lookup_field_or_method`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Found(Member),
    /// Several members at the shallowest depth; `path` leads to one of them.
    Ambiguous { path: Vec<usize> },
    NotFound,
}

impl LookupResult {
    pub fn found(&self) -> Option<&Member> {
        match self {
            LookupResult::Found(member) => Some(member),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }
}

/// A type reached through embedding, waiting to be searched.
#[derive(Debug, Clone)]
pub(crate) struct Embedded {
    pub ty: TypeId,
    /// Path from the base type to this embedded field.
    pub index: Vec<usize>,
    pub indirect: bool,
    /// Reached along more than one path at this depth.
    pub multiples: bool,
}

impl Embedded {
    pub(crate) fn root(ty: TypeId, indirect: bool) -> Self {
        Self {
            ty,
            index: Vec::new(),
            indirect,
            multiples: false,
        }
    }

    pub(crate) fn path_to(&self, i: usize) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.index.len() + 1);
        path.extend_from_slice(&self.index);
        path.push(i);
        path
    }
}

/// Look up the field or method `name` of `ty` as seen from package `pkg`.
///
/// Unexported names only match members declared in `pkg`. The blank
/// identifier matches nothing, and pointers to interfaces have no members.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn lookup_field_or_method<S: Symbols + ?Sized>(
    symbols: &S,
    ty: TypeId,
    pkg: Option<PackageId>,
    name: &str,
) -> LookupResult {
    if name == "_" {
        return LookupResult::NotFound;
    }

    let (base, is_ptr) = deref(symbols, ty);
    if is_ptr && is_interface(symbols, base) {
        return LookupResult::NotFound;
    }

    let mut current = vec![Embedded::root(base, is_ptr)];
    let mut seen: FxHashSet<TypeId> = FxHashSet::default();
    let mut depth = 0usize;

    while !current.is_empty() {
        trace!(depth, frontier = current.len(), name, "lookup depth");
        let mut next: Vec<Embedded> = Vec::new();
        let mut found: Option<Member> = None;

        for entry in &current {
            let mut typ = entry.ty;

            if let Type::Named(named) = symbols.ty(typ) {
                if !seen.insert(typ) {
                    continue;
                }
                if let Some(i) = named
                    .methods
                    .iter()
                    .position(|m| symbols.object(*m).same_id(pkg, name))
                {
                    if found.is_some() || entry.multiples {
                        return LookupResult::Ambiguous { path: entry.path_to(i) };
                    }
                    found = Some(Member {
                        object: named.methods[i],
                        path: entry.path_to(i),
                        indirect: entry.indirect,
                    });
                    continue;
                }
                typ = named.underlying;
            }

            match symbols.ty(typ) {
                Type::Struct(st) => {
                    for (i, &field) in st.fields.iter().enumerate() {
                        let f = symbols.object(field);
                        if f.same_id(pkg, name) {
                            if found.is_some() || entry.multiples {
                                return LookupResult::Ambiguous { path: entry.path_to(i) };
                            }
                            found = Some(Member {
                                object: field,
                                path: entry.path_to(i),
                                indirect: entry.indirect,
                            });
                            continue;
                        }
                        // Embedded fields are only searched further down
                        // while nothing was found at this depth.
                        if found.is_none()
                            && f.is_embedded()
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
                    if let Some(i) = iface.methods.iter().position(|m| symbols.object(*m).same_id(pkg, name)) {
                        if found.is_some() || entry.multiples {
                            return LookupResult::Ambiguous { path: entry.path_to(i) };
                        }
                        found = Some(Member {
                            object: iface.methods[i],
                            path: entry.path_to(i),
                            indirect: entry.indirect,
                        });
                    }
                }
                _ => {}
            }
        }

        if let Some(member) = found {
            trace!(depth, name, indirect = member.indirect, "member found");
            return LookupResult::Found(member);
        }

        current = consolidate_multiples(symbols, next);
        depth += 1;
    }

    LookupResult::NotFound
}

/// Merge entries with identical types, marking the survivors as `multiples`.
///
/// The first occurrence keeps its path and indirection.
pub(crate) fn consolidate_multiples<S: Symbols + ?Sized>(symbols: &S, list: Vec<Embedded>) -> Vec<Embedded> {
    if list.len() <= 1 {
        return list;
    }
    let mut out: Vec<Embedded> = Vec::with_capacity(list.len());
    for entry in list {
        match out.iter_mut().find(|e| identical(symbols, e.ty, entry.ty)) {
            Some(existing) => existing.multiples = true,
            None => out.push(entry),
        }
    }
    out
}
