//! gocheck Checker
//!
//! Semantic resolution of call and selector expressions for a Go-like
//! language, run against a [`SymbolRegistry`](gocheck_registry::SymbolRegistry)
//! built beforehand.
//!
//! ## Architecture
//!
//! - **Evaluation**: [`Checker`] walks expressions and produces an [`Operand`]
//!   for each, reporting diagnostics as it goes.
//! - **Recording**: identifier uses, selections and (optionally) expression
//!   types land in [`TypeInfo`], returned with the diagnostics by
//!   [`Checker::finish`].
//!
//! ## Modules
//!
//! - [`assignment`]: Assignability of values to typed destinations
//! - [`checker`]: Checker state, configuration and output
//! - [`conversion`]: Explicit conversions `T(x)`
//! - [`expr`]: Expression dispatch, calls, arguments and selectors
//! - [`info`]: Recorded uses, selections and types
//! - [`lookup`]: Field and method lookup through embedded fields
//! - [`method_set`]: Method sets of types
//! - [`operand`]: The result of evaluating an expression
//! - [`type_context`]: Types created while checking

pub mod assignment;
mod builtin;
pub mod checker;
pub mod conversion;
pub mod expr;
pub mod info;
pub mod lookup;
pub mod method_set;
pub mod operand;
pub mod type_context;

#[cfg(test)]
mod fixture;

pub use assignment::{assign, assignable_to, missing_method};
pub use checker::{CheckOutput, Checker, CheckerConfig};
pub use conversion::{ConversionKind, find_conversion};
pub use info::{Selection, SelectionKind, TypeAndValue, TypeInfo};
pub use lookup::{LookupResult, Member, lookup_field_or_method};
pub use method_set::{MethodSet, method_set};
pub use operand::{Operand, OperandMode};
pub use type_context::TypeContext;
