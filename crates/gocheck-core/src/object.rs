//! Declared objects and packages.
//!
//! Every named entity a program can refer to is an [`Object`]. The kind of
//! entity is a closed sum ([`ObjectKind`]) so that every consumer matches all
//! of them explicitly.

use bitflags::bitflags;

use crate::constant::ConstValue;
use crate::ids::{PackageId, ScopeId, TypeId};
use crate::span::Span;

bitflags! {
    /// Extra classification for `Variable` objects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VarFlags: u8 {
        /// The variable is a struct field.
        const FIELD = 1 << 0;
        /// The field was declared without a name (embedded).
        const EMBEDDED = 1 << 1;
    }
}

/// What a declared name denotes.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Constant { ty: TypeId, value: ConstValue },
    TypeName { ty: TypeId },
    Variable { ty: TypeId, flags: VarFlags },
    /// A function or method. `ty` is a `Type::Signature`, or a
    /// `Type::Builtin` for the universe builtins. `recv` is the receiver
    /// type (`T` or `*T`) of methods.
    Function { ty: TypeId, recv: Option<TypeId> },
    /// An imported package name.
    Package { package: PackageId },
}

/// A named entity declared in some scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    /// Declaring package; `None` for universe objects.
    pub pkg: Option<PackageId>,
    pub span: Span,
    pub kind: ObjectKind,
}

impl Object {
    pub fn new(name: impl Into<String>, pkg: Option<PackageId>, span: Span, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            pkg,
            span,
            kind,
        }
    }

    /// The object's type. Package names have none.
    pub fn ty(&self) -> Option<TypeId> {
        match &self.kind {
            ObjectKind::Constant { ty, .. }
            | ObjectKind::TypeName { ty }
            | ObjectKind::Variable { ty, .. }
            | ObjectKind::Function { ty, .. } => Some(*ty),
            ObjectKind::Package { .. } => None,
        }
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Whether this object is what `name` refers to when used from package `pkg`.
    ///
    /// Exported names are the same everywhere; unexported names only match
    /// objects declared in the same package.
    pub fn same_id(&self, pkg: Option<PackageId>, name: &str) -> bool {
        if self.name != name {
            return false;
        }
        is_exported(name) || self.pkg == pkg
    }

    pub fn is_field(&self) -> bool {
        matches!(&self.kind, ObjectKind::Variable { flags, .. } if flags.contains(VarFlags::FIELD))
    }

    pub fn is_embedded(&self) -> bool {
        matches!(&self.kind, ObjectKind::Variable { flags, .. } if flags.contains(VarFlags::EMBEDDED))
    }

    /// Receiver type when this object is a method.
    pub fn receiver(&self) -> Option<TypeId> {
        match &self.kind {
            ObjectKind::Function { recv, .. } => *recv,
            _ => None,
        }
    }

    /// Short noun for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ObjectKind::Constant { .. } => "constant",
            ObjectKind::TypeName { .. } => "type",
            ObjectKind::Variable { flags, .. } if flags.contains(VarFlags::FIELD) => "field",
            ObjectKind::Variable { .. } => "variable",
            ObjectKind::Function { recv: Some(_), .. } => "method",
            ObjectKind::Function { .. } => "function",
            ObjectKind::Package { .. } => "package",
        }
    }
}

/// A package: its import path, its name, and the scope holding its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub path: String,
    pub name: String,
    pub scope: ScopeId,
}

/// Whether `name` is visible outside its package (starts with an upper-case letter).
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
