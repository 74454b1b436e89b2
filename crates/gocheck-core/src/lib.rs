//! Core types shared by every gocheck crate.
//!
//! This crate holds the vocabulary of the checker: source spans, entity ids,
//! the semantic [`Type`] representation, declared [`Object`]s, constant
//! values, structural predicates over types, and the error and diagnostic
//! types. It has no knowledge of how symbols are stored; everything that
//! needs to resolve an id goes through the [`Symbols`] trait.

pub mod basic;
pub mod constant;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod ids;
pub mod object;
pub mod predicates;
pub mod span;
pub mod type_hash;
pub mod types;

pub use basic::{BasicInfo, BasicKind};
pub use constant::ConstValue;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use display::{signature_string, type_string};
pub use error::{ErrorKind, InternalError, RegistrationError};
pub use ids::{ObjectId, PackageId, ScopeId, TypeId};
pub use object::{Object, ObjectKind, Package, VarFlags, is_exported};
pub use span::Span;
pub use type_hash::TypeHash;
pub use types::{
    BuiltinId, BuiltinInfo, INVALID_TYPE, InterfaceType, NamedType, Param, Signature, StructType,
    Symbols, Type,
};
