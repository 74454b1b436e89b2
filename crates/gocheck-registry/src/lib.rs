//! Symbol registry for the gocheck type checker.
//!
//! Declarations are collected into a [`SymbolRegistry`] before checking
//! starts: the universe, packages and their scopes, named types with their
//! methods, struct and interface types, functions, variables and constants.
//! Once built, the registry is only read.

pub mod registry;
pub mod scope;
mod universe;

pub use registry::{FieldDecl, SymbolRegistry};
pub use scope::{Scope, ScopeKind};
