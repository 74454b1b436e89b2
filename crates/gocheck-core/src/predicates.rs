//! Structural queries on types.
//!
//! All functions take the [`Symbols`] view they resolve ids through, so they
//! work the same on the shared registry and on a checker's overlay.

use crate::basic::BasicKind;
use crate::ids::{ObjectId, TypeId};
use crate::object::ObjectKind;
use crate::types::{Param, Signature, Symbols, Type};

/// The underlying type of `ty`: itself unless it is a named type.
pub fn underlying<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> TypeId {
    match symbols.ty(ty) {
        Type::Named(named) => named.underlying,
        _ => ty,
    }
}

/// Strip one level of pointer: `(base, true)` for `*base`, else `(ty, false)`.
///
/// Only a literal pointer type is dereferenced, not a named type whose
/// underlying type is a pointer.
pub fn deref<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> (TypeId, bool) {
    match symbols.ty(ty) {
        Type::Pointer(base) => (*base, true),
        _ => (ty, false),
    }
}

/// Basic and declared types are named; every composite literal type is not.
pub fn is_named<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> bool {
    matches!(symbols.ty(ty), Type::Basic(_) | Type::Named(_))
}

pub fn is_interface<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> bool {
    matches!(symbols.ty(underlying(symbols, ty)), Type::Interface(_))
}

/// The basic kind of `ty`'s underlying type, if it is basic.
pub fn basic_kind<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> Option<BasicKind> {
    match symbols.ty(underlying(symbols, ty)) {
        Type::Basic(kind) => Some(*kind),
        _ => None,
    }
}

pub fn is_untyped<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> bool {
    matches!(symbols.ty(ty), Type::Basic(kind) if kind.is_untyped())
}

/// Element type of a slice (through named types).
pub fn slice_elem<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> Option<TypeId> {
    match symbols.ty(underlying(symbols, ty)) {
        Type::Slice(elem) => Some(*elem),
        _ => None,
    }
}

/// Whether `nil` is a valid value of `ty`.
pub fn has_nil<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> bool {
    match symbols.ty(underlying(symbols, ty)) {
        Type::Pointer(_) | Type::Slice(_) | Type::Signature(_) | Type::Interface(_) => true,
        Type::Basic(kind) => *kind == BasicKind::UntypedNil,
        _ => false,
    }
}

/// Whether the method `obj` is declared with a pointer receiver.
pub fn ptr_recv<S: Symbols + ?Sized>(symbols: &S, obj: ObjectId) -> bool {
    match &symbols.object(obj).kind {
        ObjectKind::Function { recv: Some(recv), .. } => deref(symbols, *recv).1,
        _ => false,
    }
}

/// The type an untyped constant of type `ty` takes when no other type is implied.
pub fn default_type<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> TypeId {
    match symbols.ty(ty) {
        Type::Basic(kind) if kind.is_untyped() => kind.default_kind().type_id(),
        _ => ty,
    }
}

/// Type identity.
///
/// Named types are identical only to themselves; composite types are
/// identical when structurally equal. Parameter names do not matter.
pub fn identical<S: Symbols + ?Sized>(symbols: &S, a: TypeId, b: TypeId) -> bool {
    if a == b {
        return true;
    }
    match (symbols.ty(a), symbols.ty(b)) {
        (Type::Basic(x), Type::Basic(y)) => x == y,
        (Type::Pointer(x), Type::Pointer(y)) | (Type::Slice(x), Type::Slice(y)) => {
            identical(symbols, *x, *y)
        }
        (Type::Struct(x), Type::Struct(y)) => {
            x.fields.len() == y.fields.len()
                && x.fields.iter().zip(&y.fields).all(|(f, g)| {
                    let (f, g) = (symbols.object(*f), symbols.object(*g));
                    f.name == g.name
                        && f.is_embedded() == g.is_embedded()
                        && match (f.ty(), g.ty()) {
                            (Some(ft), Some(gt)) => identical(symbols, ft, gt),
                            _ => false,
                        }
                })
        }
        (Type::Signature(x), Type::Signature(y)) => identical_signatures(symbols, x, y),
        (Type::Tuple(x), Type::Tuple(y)) => identical_params(symbols, x, y),
        (Type::Interface(x), Type::Interface(y)) => {
            if x.methods.len() != y.methods.len() {
                return false;
            }
            x.methods.iter().all(|m| {
                let m = symbols.object(*m);
                y.methods.iter().any(|n| {
                    let n = symbols.object(*n);
                    m.name == n.name
                        && match (m.ty(), n.ty()) {
                            (Some(mt), Some(nt)) => identical(symbols, mt, nt),
                            _ => false,
                        }
                })
            })
        }
        (Type::Named(x), Type::Named(y)) => x.hash == y.hash,
        (Type::Builtin(x), Type::Builtin(y)) => x == y,
        _ => false,
    }
}

pub fn identical_signatures<S: Symbols + ?Sized>(symbols: &S, x: &Signature, y: &Signature) -> bool {
    x.variadic == y.variadic
        && identical_params(symbols, &x.params, &y.params)
        && identical_params(symbols, &x.results, &y.results)
}

fn identical_params<S: Symbols + ?Sized>(symbols: &S, x: &[Param], y: &[Param]) -> bool {
    x.len() == y.len() && x.iter().zip(y).all(|(p, q)| identical(symbols, p.ty, q.ty))
}

#[cfg(test)]
pub(crate) mod test_symbols {
    //! A minimal in-memory `Symbols` for unit tests in this crate.

    use crate::basic::BasicKind;
    use crate::ids::{ObjectId, PackageId, ScopeId, TypeId};
    use crate::object::{Object, Package};
    use crate::types::{INVALID_TYPE, Symbols, Type};

    pub struct TestSymbols {
        pub types: Vec<Type>,
        pub objects: Vec<Object>,
        pub packages: Vec<Package>,
    }

    impl TestSymbols {
        pub fn new() -> Self {
            Self {
                types: BasicKind::ALL.iter().map(|k| Type::Basic(*k)).collect(),
                objects: Vec::new(),
                packages: vec![Package {
                    path: "example.com/main".into(),
                    name: "main".into(),
                    scope: ScopeId::new(0),
                }],
            }
        }

        pub fn add(&mut self, ty: Type) -> TypeId {
            self.types.push(ty);
            TypeId::global(self.types.len() as u32 - 1)
        }

        pub fn add_object(&mut self, obj: Object) -> ObjectId {
            self.objects.push(obj);
            ObjectId::from(self.objects.len() - 1)
        }

        pub fn main(&self) -> PackageId {
            PackageId::new(0)
        }
    }

    impl Symbols for TestSymbols {
        fn ty(&self, id: TypeId) -> &Type {
            if id.is_local() {
                return &INVALID_TYPE;
            }
            self.types.get(id.index()).unwrap_or(&INVALID_TYPE)
        }

        fn object(&self, id: ObjectId) -> &Object {
            &self.objects[id.index()]
        }

        fn package(&self, id: PackageId) -> &Package {
            &self.packages[id.index()]
        }
    }
}
