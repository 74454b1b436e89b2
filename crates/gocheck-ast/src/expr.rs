//! Expression AST nodes.
//!
//! Nodes are allocated in a `bumpalo::Bump` arena and borrow from it for
//! `'ast`. Small nodes are stored inline in [`Expr`]; nodes with children
//! are arena references. Every node carries the [`Span`] the checker uses
//! both for diagnostics and as the key of recorded bindings.

use std::fmt;

use gocheck_core::Span;

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Identifier reference
    Ident(IdentExpr<'ast>),
    /// Literal value
    BasicLit(LiteralExpr<'ast>),
    /// Function call, conversion, or builtin call
    Call(&'ast CallExpr<'ast>),
    /// `base.name`
    Selector(&'ast SelectorExpr<'ast>),
    /// Parenthesized expression
    Paren(&'ast ParenExpr<'ast>),
    /// `*x`: pointer type or indirection
    Star(&'ast StarExpr<'ast>),
    /// Unary prefix operation
    Unary(&'ast UnaryExpr<'ast>),
    /// `[]T`
    SliceType(&'ast SliceTypeExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Ident(e) => e.span,
            Self::BasicLit(e) => e.span,
            Self::Call(e) => e.span,
            Self::Selector(e) => e.span,
            Self::Paren(e) => e.span,
            Self::Star(e) => e.span,
            Self::Unary(e) => e.span,
            Self::SliceType(e) => e.span,
        }
    }

    /// The identifier, if this is a bare name.
    pub fn as_ident(&self) -> Option<&IdentExpr<'ast>> {
        match self {
            Self::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr<'ast> {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = paren.inner;
        }
        expr
    }
}

/// An identifier expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentExpr<'ast> {
    pub name: &'ast str,
    /// Source location
    pub span: Span,
}

impl IdentExpr<'_> {
    /// Whether this is the blank identifier `_`.
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub kind: LiteralKind<'ast>,
    /// Source location
    pub span: Span,
}

/// The kind of literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'ast> {
    Int(i128),
    Float(f64),
    Rune(char),
    /// String literal, already unquoted
    String(&'ast str),
}

/// A call: `callee(args...)`, with `ellipsis` set for a trailing `...`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    /// The function, type, or builtin being called
    pub callee: &'ast Expr<'ast>,
    pub args: &'ast [Expr<'ast>],
    /// Position of the trailing `...`, if present
    pub ellipsis: Option<Span>,
    /// Source location
    pub span: Span,
}

impl CallExpr<'_> {
    pub fn has_spread(&self) -> bool {
        self.ellipsis.is_some()
    }
}

/// Member access: `base.sel`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorExpr<'ast> {
    pub base: &'ast Expr<'ast>,
    pub sel: IdentExpr<'ast>,
    /// Source location
    pub span: Span,
}

/// `(inner)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParenExpr<'ast> {
    pub inner: &'ast Expr<'ast>,
    pub span: Span,
}

/// `*operand`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarExpr<'ast> {
    pub operand: &'ast Expr<'ast>,
    pub span: Span,
}

/// A unary prefix operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub op: UnaryOp,
    pub operand: &'ast Expr<'ast>,
    pub span: Span,
}

/// Unary prefix operators understood by the checker.
///
/// Arithmetic and logical operators belong to a separate operator checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `&` address-of
    Addr,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Addr => f.write_str("&"),
        }
    }
}

/// `[]elem`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceTypeExpr<'ast> {
    pub elem: &'ast Expr<'ast>,
    pub span: Span,
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(ident) => f.write_str(ident.name),
            Expr::BasicLit(lit) => match lit.kind {
                LiteralKind::Int(v) => write!(f, "{v}"),
                LiteralKind::Float(v) => write!(f, "{v:?}"),
                LiteralKind::Rune(c) => write!(f, "{c:?}"),
                LiteralKind::String(s) => write!(f, "{s:?}"),
            },
            Expr::Call(call) => {
                write!(f, "{}(", call.callee)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                if call.has_spread() {
                    f.write_str("...")?;
                }
                f.write_str(")")
            }
            Expr::Selector(sel) => write!(f, "{}.{}", sel.base, sel.sel.name),
            Expr::Paren(paren) => write!(f, "({})", paren.inner),
            Expr::Star(star) => write!(f, "*{}", star.operand),
            Expr::Unary(unary) => write!(f, "{}{}", unary.op, unary.operand),
            Expr::SliceType(slice) => write!(f, "[]{}", slice.elem),
        }
    }
}
