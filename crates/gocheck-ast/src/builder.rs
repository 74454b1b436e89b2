//! Programmatic construction of expression trees.
//!
//! There is no parser in this workspace; drivers, tests and benchmarks build
//! expressions through [`AstBuilder`]. Each node gets a fresh span so that
//! recorded bindings never collide.

use std::cell::Cell;

use bumpalo::Bump;
use gocheck_core::Span;

use crate::expr::{
    CallExpr, Expr, IdentExpr, LiteralExpr, LiteralKind, ParenExpr, SelectorExpr, SliceTypeExpr, StarExpr,
    UnaryExpr, UnaryOp,
};

/// Allocates expression nodes in an arena.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use gocheck_ast::AstBuilder;
///
/// let arena = Bump::new();
/// let b = AstBuilder::new(&arena);
/// let call = b.call(b.selector(b.ident("fmt"), "Println"), &[b.string("hi"), b.int(1)]);
/// assert_eq!(call.to_string(), "fmt.Println(\"hi\", 1)");
/// ```
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    line: Cell<u32>,
    col: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            line: Cell::new(1),
            col: Cell::new(1),
        }
    }

    pub fn arena(&self) -> &'ast Bump {
        self.arena
    }

    /// Continue numbering spans on the next line.
    pub fn newline(&self) {
        self.line.set(self.line.get() + 1);
        self.col.set(1);
    }

    fn span(&self, len: usize) -> Span {
        let col = self.col.get();
        let len = len.max(1) as u32;
        self.col.set(col + len);
        Span::new(self.line.get(), col, len)
    }

    fn alloc(&self, expr: Expr<'ast>) -> &'ast Expr<'ast> {
        self.arena.alloc(expr)
    }

    fn ident_expr(&self, name: &str) -> IdentExpr<'ast> {
        IdentExpr {
            name: self.arena.alloc_str(name),
            span: self.span(name.len()),
        }
    }

    pub fn ident(&self, name: &str) -> &'ast Expr<'ast> {
        let ident = self.ident_expr(name);
        self.alloc(Expr::Ident(ident))
    }

    fn literal(&self, kind: LiteralKind<'ast>, len: usize) -> &'ast Expr<'ast> {
        let span = self.span(len);
        self.alloc(Expr::BasicLit(LiteralExpr { kind, span }))
    }

    pub fn int(&self, value: i128) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Int(value), value.to_string().len())
    }

    pub fn float(&self, value: f64) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Float(value), format!("{value:?}").len())
    }

    pub fn rune(&self, value: char) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Rune(value), 3)
    }

    pub fn string(&self, value: &str) -> &'ast Expr<'ast> {
        let s = self.arena.alloc_str(value);
        self.literal(LiteralKind::String(s), value.len() + 2)
    }

    /// `callee(args...)`
    pub fn call(&self, callee: &'ast Expr<'ast>, args: &[&'ast Expr<'ast>]) -> &'ast Expr<'ast> {
        self.make_call(callee, args, false)
    }

    /// `callee(args...)` with a trailing `...` after the last argument.
    pub fn call_spread(&self, callee: &'ast Expr<'ast>, args: &[&'ast Expr<'ast>]) -> &'ast Expr<'ast> {
        self.make_call(callee, args, true)
    }

    fn make_call(&self, callee: &'ast Expr<'ast>, args: &[&'ast Expr<'ast>], spread: bool) -> &'ast Expr<'ast> {
        let args = self.arena.alloc_slice_fill_iter(args.iter().map(|arg| **arg));
        let ellipsis = spread.then(|| self.span(3));
        let close = self.span(1);
        let call = self.arena.alloc(CallExpr {
            callee,
            args,
            ellipsis,
            span: callee.span().to(close),
        });
        self.alloc(Expr::Call(call))
    }

    /// `base.name`
    pub fn selector(&self, base: &'ast Expr<'ast>, name: &str) -> &'ast Expr<'ast> {
        let sel = self.ident_expr(name);
        let node = self.arena.alloc(SelectorExpr {
            base,
            sel,
            span: base.span().to(sel.span),
        });
        self.alloc(Expr::Selector(node))
    }

    /// `(inner)`
    pub fn paren(&self, inner: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let close = self.span(1);
        let node = self.arena.alloc(ParenExpr {
            inner,
            span: inner.span().to(close),
        });
        self.alloc(Expr::Paren(node))
    }

    /// `*operand`
    pub fn star(&self, operand: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let span = self.span(1);
        let node = self.arena.alloc(StarExpr { operand, span });
        self.alloc(Expr::Star(node))
    }

    /// `&operand`
    pub fn addr(&self, operand: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        self.unary(UnaryOp::Addr, operand)
    }

    pub fn unary(&self, op: UnaryOp, operand: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let span = self.span(1);
        let node = self.arena.alloc(UnaryExpr { op, operand, span });
        self.alloc(Expr::Unary(node))
    }

    /// `[]elem`
    pub fn slice_type(&self, elem: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let span = self.span(2);
        let node = self.arena.alloc(SliceTypeExpr { elem, span });
        self.alloc(Expr::SliceType(node))
    }

    /// Parse a dotted path (`a.b.c`) into nested selectors.
    pub fn path(&self, dotted: &str) -> &'ast Expr<'ast> {
        let mut parts = dotted.split('.');
        let mut expr = self.ident(parts.next().unwrap_or_default());
        for part in parts {
            expr = self.selector(expr, part);
        }
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn spans_are_unique() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let inner = b.ident("x");
        let paren = b.paren(inner);
        let star = b.star(paren);
        let call = b.call(b.path("a.b"), &[star, b.int(10)]);
        let Expr::Call(call) = call else {
            panic!("expected call");
        };
        let mut seen = FxHashSet::default();
        for span in [inner.span(), paren.span(), star.span(), call.callee.span(), call.span] {
            assert!(seen.insert(span), "duplicate span {span:?}");
        }
    }

    #[test]
    fn display_renders_source() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let expr = b.call_spread(b.ident("append"), &[b.ident("xs"), b.ident("ys")]);
        assert_eq!(expr.to_string(), "append(xs, ys...)");
        assert_eq!(b.addr(b.path("p.X")).to_string(), "&p.X");
        assert_eq!(b.slice_type(b.star(b.ident("T"))).to_string(), "[]*T");
        assert_eq!(b.paren(b.string("s")).to_string(), "(\"s\")");
    }

    #[test]
    fn unparen_strips_all_levels() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let x = b.ident("x");
        let nested = b.paren(b.paren(x));
        assert_eq!(nested.unparen().as_ident().map(|i| i.name), Some("x"));
    }
}
