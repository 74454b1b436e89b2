//! TypeContext - a checker's view of all types.
//!
//! Layers the checker's private types over the shared, read-only
//! [`SymbolRegistry`]. Types created while checking (pointer types for `&x`,
//! result tuples, method-expression signatures) go into the local layer and
//! get [`TypeId::local`] ids; every lookup of a global id is forwarded to the
//! registry.

use gocheck_core::{
    INVALID_TYPE, Object, ObjectId, Package, PackageId, Param, Signature, Symbols, Type, TypeId,
};
use gocheck_registry::SymbolRegistry;
use rustc_hash::FxHashMap;

/// Shared registry plus checker-local types.
#[derive(Debug)]
pub struct TypeContext<'r> {
    registry: &'r SymbolRegistry,
    local: Vec<Type>,
    pointers: FxHashMap<TypeId, TypeId>,
    slices: FxHashMap<TypeId, TypeId>,
}

impl<'r> TypeContext<'r> {
    pub fn new(registry: &'r SymbolRegistry) -> Self {
        Self {
            registry,
            local: Vec::new(),
            pointers: FxHashMap::default(),
            slices: FxHashMap::default(),
        }
    }

    pub fn registry(&self) -> &'r SymbolRegistry {
        self.registry
    }

    /// Number of types synthesized so far.
    pub fn local_count(&self) -> usize {
        self.local.len()
    }

    fn push(&mut self, ty: Type) -> TypeId {
        self.local.push(ty);
        TypeId::local((self.local.len() - 1) as u32)
    }

    /// `*ty`, reusing the registry's pointer type when it has one.
    pub fn pointer_to(&mut self, ty: TypeId) -> TypeId {
        if let Some(ptr) = self.registry.find_pointer(ty).or_else(|| self.pointers.get(&ty).copied()) {
            return ptr;
        }
        let ptr = self.push(Type::Pointer(ty));
        self.pointers.insert(ty, ptr);
        ptr
    }

    /// `[]ty`, reusing the registry's slice type when it has one.
    pub fn slice_of(&mut self, ty: TypeId) -> TypeId {
        if let Some(slice) = self.registry.find_slice(ty).or_else(|| self.slices.get(&ty).copied()) {
            return slice;
        }
        let slice = self.push(Type::Slice(ty));
        self.slices.insert(ty, slice);
        slice
    }

    pub fn tuple(&mut self, vars: Vec<Param>) -> TypeId {
        self.push(Type::Tuple(vars))
    }

    pub fn signature(&mut self, sig: Signature) -> TypeId {
        self.push(Type::Signature(sig))
    }
}

impl Symbols for TypeContext<'_> {
    fn ty(&self, id: TypeId) -> &Type {
        if id.is_local() {
            self.local.get(id.index()).unwrap_or(&INVALID_TYPE)
        } else {
            self.registry.ty(id)
        }
    }

    fn object(&self, id: ObjectId) -> &Object {
        self.registry.object(id)
    }

    fn package(&self, id: PackageId) -> &Package {
        self.registry.package(id)
    }
}
