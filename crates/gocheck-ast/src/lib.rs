//! Expression syntax trees for the gocheck type checker.
//!
//! The checker consumes call and selector expressions together with the
//! handful of surrounding forms needed to build them: identifiers, literals,
//! parentheses, `*x`, `&x` and `[]T`. Trees live in a `bumpalo` arena.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use gocheck_ast::{AstBuilder, Expr};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let expr = b.call(b.ident("f"), &[b.int(1), b.string("x")]);
//! assert!(matches!(expr, Expr::Call(call) if call.args.len() == 2));
//! ```

pub mod builder;
pub mod expr;

pub use builder::AstBuilder;
pub use expr::{
    CallExpr, Expr, IdentExpr, LiteralExpr, LiteralKind, ParenExpr, SelectorExpr, SliceTypeExpr, StarExpr,
    UnaryExpr, UnaryOp,
};
