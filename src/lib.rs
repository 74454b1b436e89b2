//! gocheck
//!
//! Call and selector resolution for a Go-like language.
//!
//! The work is split across crates, re-exported here:
//!
//! - [`core`]: ids, types, objects, constants, diagnostics and error kinds
//! - [`ast`]: the arena-allocated expression tree the checker walks
//! - [`registry`]: the symbol registry declarations are collected into
//! - [`checker`]: the expression checker itself
//!
//! ```
//! use gocheck::prelude::*;
//!
//! let mut registry = SymbolRegistry::new();
//! let pkg = registry.new_package("example.com/app", "app").unwrap();
//! let scope = registry.package_scope(pkg);
//! let int = BasicKind::Int.type_id();
//! let sig = registry.func(&[int], &[int], false).unwrap();
//! registry.declare_func(scope, "double", sig).unwrap();
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let mut checker = Checker::new(&registry, pkg);
//! let x = checker.expr(b.call(b.ident("double"), &[b.int(21)]));
//! assert_eq!(x.ty, Some(int));
//! assert!(checker.finish().is_success());
//! ```

pub use gocheck_ast as ast;
pub use gocheck_checker as checker;
pub use gocheck_core as core;
pub use gocheck_registry as registry;

pub mod prelude {
    pub use bumpalo::Bump;
    pub use gocheck_ast::{AstBuilder, CallExpr, Expr, SelectorExpr};
    pub use gocheck_checker::{
        CheckOutput, Checker, CheckerConfig, LookupResult, MethodSet, Operand, OperandMode, Selection,
        SelectionKind, TypeInfo, lookup_field_or_method, method_set,
    };
    pub use gocheck_core::{
        BasicKind, ConstValue, Diagnostic, Diagnostics, ErrorKind, ObjectId, PackageId, ScopeId, Span,
        Symbols, Type, TypeId,
    };
    pub use gocheck_registry::{FieldDecl, SymbolRegistry};
}
