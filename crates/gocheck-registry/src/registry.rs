//! SymbolRegistry - storage for every declared entity.
//!
//! This module provides [`SymbolRegistry`], the central store for types,
//! objects, scopes and packages. Entities are kept in flat vectors and
//! referred to by index ids from `gocheck-core`.
//!
//! # Storage Model
//!
//! - **Types**: one vector; the basic types occupy the first slots in
//!   [`BasicKind`] order, so `BasicKind::type_id` is valid for every registry.
//!   Pointer and slice types are interned.
//! - **Objects**: one vector. Scope-level objects are also bound by name in
//!   their scope; fields and methods are reachable only through their type.
//! - **Scopes**: a tree rooted at the universe scope ([`SymbolRegistry::UNIVERSE`]).
//!
//! # Thread Safety
//!
//! The registry is built single-threaded and then only read. Checkers borrow
//! it immutably and keep the types they synthesize in their own overlay, so a
//! finished registry can be shared behind an `Arc` by any number of checkers
//! running on different threads.
//!
//! # Example
//!
//! ```
//! use gocheck_core::{BasicKind, ConstValue, ObjectKind, Symbols};
//! use gocheck_registry::SymbolRegistry;
//!
//! let mut registry = SymbolRegistry::new();
//! let math = registry.new_package("math", "math").unwrap();
//! let scope = registry.package_scope(math);
//! let pi = registry
//!     .declare_const(scope, "Pi", BasicKind::UntypedFloat.type_id(), ConstValue::float(3.14159))
//!     .unwrap();
//!
//! assert_eq!(registry.lookup(scope, "Pi"), Some(pi));
//! assert!(matches!(registry.object(pi).kind, ObjectKind::Constant { .. }));
//! ```

use gocheck_core::{
    BasicKind, ConstValue, InterfaceType, NamedType, Object, ObjectId, ObjectKind, Package, PackageId,
    Param, RegistrationError, ScopeId, Signature, Span, StructType, Symbols, Type, TypeHash, TypeId,
    VarFlags, INVALID_TYPE, type_string,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::scope::{Scope, ScopeKind};
use crate::universe;

/// A struct field to declare with [`SymbolRegistry::new_struct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl<'a> {
    /// `None` for an embedded field.
    pub name: Option<&'a str>,
    pub ty: TypeId,
}

impl<'a> FieldDecl<'a> {
    pub fn named(name: &'a str, ty: TypeId) -> Self {
        Self { name: Some(name), ty }
    }

    pub fn embedded(ty: TypeId) -> Self {
        Self { name: None, ty }
    }
}

/// Types, objects, scopes and packages of a program.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    types: Vec<Type>,
    objects: Vec<Object>,
    scopes: Vec<Scope>,
    packages: Vec<Package>,

    /// Interned `*T` by `T`.
    pointers: FxHashMap<TypeId, TypeId>,
    /// Interned `[]T` by `T`.
    slices: FxHashMap<TypeId, TypeId>,
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolRegistry {
    /// The universe scope, root of every scope chain.
    pub const UNIVERSE: ScopeId = ScopeId::new(0);

    /// Create a registry holding the universe scope.
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            objects: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::Universe, None)],
            packages: Vec::new(),
            pointers: FxHashMap::default(),
            slices: FxHashMap::default(),
        };
        universe::populate(&mut registry);
        registry
    }

    // ==========================================================================
    // Raw storage
    // ==========================================================================

    pub(crate) fn push_type(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId::global((self.types.len() - 1) as u32)
    }

    pub(crate) fn push_object(&mut self, obj: Object) -> ObjectId {
        self.objects.push(obj);
        ObjectId::from(self.objects.len() - 1)
    }

    /// Bind an object in the universe. Only used while populating it.
    pub(crate) fn bind_universe(&mut self, obj: Object) -> ObjectId {
        let name = obj.name.clone();
        let id = self.push_object(obj);
        self.scopes[Self::UNIVERSE.index()].insert(&name, id);
        id
    }

    pub(crate) fn set_type(&mut self, id: TypeId, ty: Type) {
        if let Some(slot) = self.types.get_mut(id.index()) {
            *slot = ty;
        }
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    // ==========================================================================
    // Packages and scopes
    // ==========================================================================

    /// Create a package and its package scope.
    ///
    /// Import paths are unique: named types are identified by `path.Name`.
    pub fn new_package(&mut self, path: &str, name: &str) -> Result<PackageId, RegistrationError> {
        if self.packages.iter().any(|p| p.path == path) {
            return Err(RegistrationError::DuplicatePackage { path: path.to_string() });
        }
        let id = PackageId::from(self.packages.len());
        let scope = ScopeId::from(self.scopes.len());
        self.scopes
            .push(Scope::new(Some(Self::UNIVERSE), ScopeKind::Package, Some(id)));
        self.packages.push(Package {
            path: path.to_string(),
            name: name.to_string(),
            scope,
        });
        debug!(path, name, "registered package");
        Ok(id)
    }

    pub fn package_scope(&self, pkg: PackageId) -> ScopeId {
        self.packages[pkg.index()].scope
    }

    /// Create a scope nested in `parent`.
    pub fn new_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> Result<ScopeId, RegistrationError> {
        let pkg = self.scope_ref(parent)?.pkg;
        self.scopes.push(Scope::new(Some(parent), kind, pkg));
        Ok(ScopeId::from(self.scopes.len() - 1))
    }

    /// Create a file scope for `pkg`, where its imports are declared.
    pub fn new_file_scope(&mut self, pkg: PackageId) -> Result<ScopeId, RegistrationError> {
        self.new_scope(self.package_scope(pkg), ScopeKind::File)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    fn scope_ref(&self, id: ScopeId) -> Result<&Scope, RegistrationError> {
        self.scopes
            .get(id.index())
            .ok_or(RegistrationError::UnknownScope(id.index()))
    }

    // ==========================================================================
    // Declarations
    // ==========================================================================

    /// Declare `obj` in `scope`.
    ///
    /// The blank identifier `_` creates an object but binds nothing.
    pub fn insert(&mut self, scope: ScopeId, obj: Object) -> Result<ObjectId, RegistrationError> {
        let target = self.scope_ref(scope)?;
        if obj.name != "_" && target.contains(&obj.name) {
            return Err(RegistrationError::Duplicate {
                name: obj.name,
                span: obj.span,
            });
        }
        let name = obj.name.clone();
        let id = self.push_object(obj);
        if name != "_" {
            self.scopes[scope.index()].insert(&name, id);
        }
        trace!(name = %name, ?scope, "declared object");
        Ok(id)
    }

    fn declare(&mut self, scope: ScopeId, name: &str, kind: ObjectKind) -> Result<ObjectId, RegistrationError> {
        let pkg = self.scope_ref(scope)?.pkg;
        self.insert(scope, Object::new(name, pkg, Span::default(), kind))
    }

    pub fn declare_const(
        &mut self,
        scope: ScopeId,
        name: &str,
        ty: TypeId,
        value: ConstValue,
    ) -> Result<ObjectId, RegistrationError> {
        self.declare(scope, name, ObjectKind::Constant { ty, value })
    }

    pub fn declare_var(&mut self, scope: ScopeId, name: &str, ty: TypeId) -> Result<ObjectId, RegistrationError> {
        self.declare(
            scope,
            name,
            ObjectKind::Variable {
                ty,
                flags: VarFlags::empty(),
            },
        )
    }

    /// Declare a function whose type is the signature `sig`.
    pub fn declare_func(&mut self, scope: ScopeId, name: &str, sig: TypeId) -> Result<ObjectId, RegistrationError> {
        self.declare(scope, name, ObjectKind::Function { ty: sig, recv: None })
    }

    /// Declare a named type whose underlying type is set later.
    ///
    /// Splitting declaration from [`set_underlying`](Self::set_underlying)
    /// allows recursive types such as `type Node struct { next *Node }`.
    pub fn declare_type(&mut self, scope: ScopeId, name: &str) -> Result<TypeId, RegistrationError> {
        let hash = self.named_hash(scope, name)?;
        let ty = TypeId::global(self.types.len() as u32);
        let obj = self.declare(scope, name, ObjectKind::TypeName { ty })?;
        Ok(self.push_type(Type::Named(NamedType {
            obj,
            hash,
            underlying: BasicKind::Invalid.type_id(),
            methods: Vec::new(),
        })))
    }

    pub fn set_underlying(&mut self, named: TypeId, underlying: TypeId) -> Result<(), RegistrationError> {
        if let Type::Named(inner) = self.ty(underlying) {
            return Err(RegistrationError::NamedUnderlying {
                name: self.objects[inner.obj.index()].name.clone(),
            });
        }
        if !matches!(self.ty(named), Type::Named(_)) {
            return Err(RegistrationError::NotNamed {
                found: type_string(self, named, None),
            });
        }
        if let Some(Type::Named(decl)) = self.types.get_mut(named.index()) {
            decl.underlying = underlying;
        }
        Ok(())
    }

    /// Declare `type name underlying`.
    pub fn declare_named(&mut self, scope: ScopeId, name: &str, underlying: TypeId) -> Result<TypeId, RegistrationError> {
        let named = self.declare_type(scope, name)?;
        self.set_underlying(named, self.underlying_of(underlying))?;
        Ok(named)
    }

    fn underlying_of(&self, ty: TypeId) -> TypeId {
        gocheck_core::predicates::underlying(self, ty)
    }

    fn named_hash(&self, scope: ScopeId, name: &str) -> Result<TypeHash, RegistrationError> {
        let target = self.scope_ref(scope)?;
        Ok(match (target.kind, target.pkg) {
            (ScopeKind::Universe, _) | (_, None) => TypeHash::from_name(name),
            (ScopeKind::Package, Some(pkg)) => TypeHash::from_qualified(&self.packages[pkg.index()].path, name),
            (_, Some(pkg)) => {
                let path = format!("{}#{}", self.packages[pkg.index()].path, scope.index());
                TypeHash::from_qualified(&path, name)
            }
        })
    }

    /// Declare a method on the named type `named`.
    ///
    /// With `pointer_receiver` the receiver is `*named`, otherwise `named`.
    pub fn add_method(
        &mut self,
        named: TypeId,
        name: &str,
        pointer_receiver: bool,
        sig: TypeId,
    ) -> Result<ObjectId, RegistrationError> {
        let (decl_obj, methods) = match self.ty(named) {
            Type::Named(decl) => (decl.obj, decl.methods.clone()),
            _ => {
                return Err(RegistrationError::InvalidReceiver {
                    receiver: type_string(self, named, None),
                    span: Span::default(),
                });
            }
        };
        if matches!(self.ty(self.underlying_of(named)), Type::Pointer(_) | Type::Interface(_)) {
            return Err(RegistrationError::InvalidReceiver {
                receiver: type_string(self, named, None),
                span: Span::default(),
            });
        }
        if methods.iter().any(|m| self.objects[m.index()].name == name) {
            return Err(RegistrationError::Duplicate {
                name: name.to_string(),
                span: Span::default(),
            });
        }

        let recv = if pointer_receiver { self.pointer_to(named) } else { named };
        let pkg = self.objects[decl_obj.index()].pkg;
        let method = self.push_object(Object::new(
            name,
            pkg,
            Span::default(),
            ObjectKind::Function { ty: sig, recv: Some(recv) },
        ));
        if let Some(Type::Named(decl)) = self.types.get_mut(named.index()) {
            decl.methods.push(method);
        }
        trace!(method = name, pointer_receiver, "declared method");
        Ok(method)
    }

    // ==========================================================================
    // Type construction
    // ==========================================================================

    /// `*ty`, interned.
    pub fn pointer_to(&mut self, ty: TypeId) -> TypeId {
        if let Some(ptr) = self.pointers.get(&ty) {
            return *ptr;
        }
        let ptr = self.push_type(Type::Pointer(ty));
        self.pointers.insert(ty, ptr);
        ptr
    }

    /// `[]ty`, interned.
    pub fn slice_of(&mut self, ty: TypeId) -> TypeId {
        if let Some(slice) = self.slices.get(&ty) {
            return *slice;
        }
        let slice = self.push_type(Type::Slice(ty));
        self.slices.insert(ty, slice);
        slice
    }

    /// The interned `*ty`, if one exists.
    pub fn find_pointer(&self, ty: TypeId) -> Option<TypeId> {
        self.pointers.get(&ty).copied()
    }

    /// The interned `[]ty`, if one exists.
    pub fn find_slice(&self, ty: TypeId) -> Option<TypeId> {
        self.slices.get(&ty).copied()
    }

    /// Register a signature type.
    ///
    /// A variadic signature must end in a parameter of slice type.
    pub fn new_signature(&mut self, sig: Signature) -> Result<TypeId, RegistrationError> {
        if sig.variadic {
            let last = sig.params.last().ok_or(RegistrationError::VariadicWithoutParams)?;
            if !matches!(self.ty(last.ty), Type::Slice(_)) {
                return Err(RegistrationError::VariadicNotSlice {
                    found: type_string(self, last.ty, None),
                });
            }
        }
        Ok(self.push_type(Type::Signature(sig)))
    }

    /// Shorthand for a signature with unnamed parameters and results.
    pub fn func(&mut self, params: &[TypeId], results: &[TypeId], variadic: bool) -> Result<TypeId, RegistrationError> {
        self.new_signature(Signature::new(
            params.iter().copied().map(Param::unnamed).collect(),
            results.iter().copied().map(Param::unnamed).collect(),
            variadic,
        ))
    }

    pub fn new_tuple(&mut self, vars: Vec<Param>) -> TypeId {
        self.push_type(Type::Tuple(vars))
    }

    /// A struct type with fields declared by package `pkg`.
    pub fn new_struct(&mut self, pkg: Option<PackageId>, fields: &[FieldDecl<'_>]) -> Result<TypeId, RegistrationError> {
        let mut ids: Vec<ObjectId> = Vec::with_capacity(fields.len());
        for field in fields {
            let (name, flags) = match field.name {
                Some(name) => (name.to_string(), VarFlags::FIELD),
                None => (self.embedded_name(field.ty)?, VarFlags::FIELD | VarFlags::EMBEDDED),
            };
            if name != "_" && ids.iter().any(|id| self.objects[id.index()].name == name) {
                return Err(RegistrationError::Duplicate {
                    name,
                    span: Span::default(),
                });
            }
            ids.push(self.push_object(Object::new(
                name,
                pkg,
                Span::default(),
                ObjectKind::Variable { ty: field.ty, flags },
            )));
        }
        Ok(self.push_type(Type::Struct(StructType { fields: ids })))
    }

    /// The implicit name of an embedded field of type `T` or `*T`.
    fn embedded_name(&self, ty: TypeId) -> Result<String, RegistrationError> {
        let (base, _) = gocheck_core::predicates::deref(self, ty);
        match self.ty(base) {
            Type::Named(named) => Ok(self.objects[named.obj.index()].name.clone()),
            Type::Basic(kind) if !kind.is_untyped() && *kind != BasicKind::Invalid => Ok(kind.name().to_string()),
            _ => Err(RegistrationError::InvalidEmbeddedField {
                found: type_string(self, ty, None),
            }),
        }
    }

    /// An interface type with the given method names and signatures.
    pub fn new_interface(
        &mut self,
        pkg: Option<PackageId>,
        methods: &[(&str, TypeId)],
    ) -> Result<TypeId, RegistrationError> {
        let iface = self.push_type(Type::Interface(InterfaceType::default()));
        let mut ids: Vec<ObjectId> = Vec::with_capacity(methods.len());
        for (name, sig) in methods {
            if ids.iter().any(|id| self.objects[id.index()].name == *name) {
                return Err(RegistrationError::Duplicate {
                    name: name.to_string(),
                    span: Span::default(),
                });
            }
            ids.push(self.push_object(Object::new(
                *name,
                pkg,
                Span::default(),
                ObjectKind::Function { ty: *sig, recv: Some(iface) },
            )));
        }
        self.set_type(iface, Type::Interface(InterfaceType { methods: ids }));
        Ok(iface)
    }

    // ==========================================================================
    // Imports
    // ==========================================================================

    /// Declare the package name for `package` in `file_scope`, optionally renamed.
    pub fn import(
        &mut self,
        file_scope: ScopeId,
        package: PackageId,
        alias: Option<&str>,
    ) -> Result<ObjectId, RegistrationError> {
        let name = alias.map_or_else(|| self.packages[package.index()].name.clone(), str::to_string);
        self.declare(file_scope, &name, ObjectKind::Package { package })
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Object declared directly in `scope`.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<ObjectId> {
        self.scope(scope)?.get(name)
    }

    /// Resolve `name` starting at `scope` and walking outwards.
    ///
    /// Returns the scope that declares it along with the object.
    pub fn lookup_parent(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, ObjectId)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scope(id)?;
            if let Some(obj) = s.get(name) {
                return Some((id, obj));
            }
            current = s.parent;
        }
        None
    }

    /// A type declared in the universe (`int`, `error`, ...).
    pub fn universe_type(&self, name: &str) -> Option<TypeId> {
        self.lookup_type(Self::UNIVERSE, name)
    }

    /// Resolve `name` from `scope` as a type name.
    pub fn lookup_type(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        let (_, obj) = self.lookup_parent(scope, name)?;
        match &self.objects[obj.index()].kind {
            ObjectKind::TypeName { ty } => Some(*ty),
            _ => None,
        }
    }
}

impl Symbols for SymbolRegistry {
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
