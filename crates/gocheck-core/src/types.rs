//! Semantic type representation.
//!
//! Types reference each other through [`TypeId`]s and reference their
//! members (struct fields, methods) through [`ObjectId`]s. Resolving either
//! kind of id goes through the [`Symbols`] trait, which is implemented by the
//! shared registry and by each checker's overlay on top of it.

use crate::basic::BasicKind;
use crate::ids::{ObjectId, PackageId, TypeId};
use crate::object::{Object, Package};
use crate::type_hash::TypeHash;

/// Read access to types, objects and packages.
pub trait Symbols {
    /// Resolve a type id. Unknown ids resolve to the invalid basic type.
    fn ty(&self, id: TypeId) -> &Type;

    /// Resolve an object id.
    fn object(&self, id: ObjectId) -> &Object;

    /// Resolve a package id.
    fn package(&self, id: PackageId) -> &Package;
}

/// The type every unresolvable id maps to.
pub static INVALID_TYPE: Type = Type::Basic(BasicKind::Invalid);

/// A semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Basic(BasicKind),
    Pointer(TypeId),
    Slice(TypeId),
    Struct(StructType),
    /// A function signature. Methods keep their receiver on the object, not here.
    Signature(Signature),
    /// The component types of a multi-valued expression.
    Tuple(Vec<Param>),
    Interface(InterfaceType),
    Named(NamedType),
    /// The type of a predeclared builtin function.
    Builtin(BuiltinId),
}

impl Type {
    pub fn as_signature(&self) -> Option<&Signature> {
        match self {
            Type::Signature(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Type::Named(named) => Some(named),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Param]> {
        match self {
            Type::Tuple(vars) => Some(vars),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Type::Basic(BasicKind::Invalid))
    }
}

/// A parameter, result, or tuple component.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeId,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeId) -> Self {
        Self { name: None, ty }
    }
}

/// A function signature.
///
/// When `variadic` is set the last parameter has a slice type; the registry
/// refuses to create signatures that break this.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Param>, results: Vec<Param>, variadic: bool) -> Self {
        Self {
            params,
            results,
            variadic,
        }
    }

    /// The variadic parameter, if any.
    pub fn variadic_param(&self) -> Option<&Param> {
        if self.variadic {
            self.params.last()
        } else {
            None
        }
    }
}

/// A struct type. Fields are `Variable` objects flagged as fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructType {
    pub fields: Vec<ObjectId>,
}

/// An interface type. Methods are `Function` objects whose receiver is the interface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterfaceType {
    pub methods: Vec<ObjectId>,
}

/// A declared (named) type.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    /// The `TypeName` object declaring this type.
    pub obj: ObjectId,
    /// Identity of the declaration.
    pub hash: TypeHash,
    /// Never itself a named type.
    pub underlying: TypeId,
    /// Methods declared with this type (or a pointer to it) as receiver.
    pub methods: Vec<ObjectId>,
}

/// Predeclared builtin functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinId {
    Append,
    Cap,
    Copy,
    Len,
    New,
    Panic,
    Print,
    Println,
}

/// Static arity and classification of a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinInfo {
    pub name: &'static str,
    /// Minimum number of arguments.
    pub nargs: usize,
    /// Accepts more than `nargs` arguments.
    pub variadic: bool,
    /// Produces no value.
    pub statement: bool,
}

impl BuiltinId {
    pub const ALL: [BuiltinId; 8] = [
        BuiltinId::Append,
        BuiltinId::Cap,
        BuiltinId::Copy,
        BuiltinId::Len,
        BuiltinId::New,
        BuiltinId::Panic,
        BuiltinId::Print,
        BuiltinId::Println,
    ];

    pub fn info(self) -> BuiltinInfo {
        let (name, nargs, variadic, statement) = match self {
            BuiltinId::Append => ("append", 1, true, false),
            BuiltinId::Cap => ("cap", 1, false, false),
            BuiltinId::Copy => ("copy", 2, false, false),
            BuiltinId::Len => ("len", 1, false, false),
            BuiltinId::New => ("new", 1, false, false),
            BuiltinId::Panic => ("panic", 1, false, true),
            BuiltinId::Print => ("print", 0, true, true),
            BuiltinId::Println => ("println", 0, true, true),
        };
        BuiltinInfo {
            name,
            nargs,
            variadic,
            statement,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}
