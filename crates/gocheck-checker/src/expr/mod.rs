//! Expression evaluation.
//!
//! Every expression form has a `check_*` function in its own module taking
//! the [`Checker`]; this module dispatches on the node kind and exposes the
//! entry points used by the rest of the checker:
//!
//! - [`Checker::expr_or_type`] evaluates an expression that may also denote a type
//! - [`Checker::expr`] evaluates an expression that must denote a value
//! - [`Checker::raw_expr`] accepts anything, including calls without results
//! - [`Checker::call`], [`Checker::selector`] and [`Checker::argument`] are
//!   the call and selector forms

mod arguments;
mod calls;
mod selector;

use gocheck_ast::{CallExpr, Expr, IdentExpr, LiteralExpr, LiteralKind, SelectorExpr, UnaryExpr, UnaryOp};
use gocheck_core::predicates::underlying;
use gocheck_core::{
    BasicKind, BuiltinId, ConstValue, ErrorKind, ObjectKind, Signature, Symbols, Type, TypeId,
};

use crate::checker::Checker;
use crate::operand::{Operand, OperandMode};

impl<'r> Checker<'r> {
    /// Evaluate `e` without restricting its mode.
    ///
    /// This is the entry point for expression statements, where a call
    /// without results is fine.
    pub fn raw_expr<'ast>(&mut self, e: &'ast Expr<'ast>) -> Operand<'ast> {
        let x = match e {
            Expr::Ident(ident) => self.ident(ident),
            Expr::BasicLit(lit) => literal(lit),
            Expr::Call(call) => calls::check_call(self, *call),
            Expr::Selector(sel) => selector::check_selector(self, *sel),
            Expr::Paren(paren) => {
                let mut x = self.raw_expr(paren.inner);
                x.expr = Some(*e);
                x
            }
            Expr::Star(star) => self.star(e, star.operand),
            Expr::Unary(unary) => self.unary(*unary),
            Expr::SliceType(slice) => match self.type_expr(slice.elem) {
                Some(elem) => {
                    let ty = self.types_mut().slice_of(elem);
                    Operand::type_expr(*e, ty)
                }
                None => Operand::invalid(*e),
            },
        };
        self.record_type(&x);
        x
    }

    /// Evaluate `e`, which may denote a value or a type.
    pub fn expr_or_type<'ast>(&mut self, e: &'ast Expr<'ast>) -> Operand<'ast> {
        let mut x = self.raw_expr(e);
        if x.mode == OperandMode::NoValue {
            let msg = format!("{} used as value or type", e);
            self.error(e.span(), ErrorKind::NoValueUsedAsValue, msg);
            x.invalidate();
        }
        x
    }

    /// Evaluate `e`, which must denote a value.
    pub fn expr<'ast>(&mut self, e: &'ast Expr<'ast>) -> Operand<'ast> {
        let mut x = self.raw_expr(e);
        match x.mode {
            OperandMode::TypeExpr => {
                let msg = format!("{} is not an expression", self.describe(&x));
                self.error(e.span(), ErrorKind::NotAnExpression, msg);
                x.invalidate();
            }
            OperandMode::NoValue => {
                let msg = format!("{} used as value", e);
                self.error(e.span(), ErrorKind::NoValueUsedAsValue, msg);
                x.invalidate();
            }
            _ => {}
        }
        x
    }

    /// Evaluate `e` as a type. Reports `NotAType` for values.
    pub fn type_expr<'ast>(&mut self, e: &'ast Expr<'ast>) -> Option<TypeId> {
        let x = self.expr_or_type(e);
        if x.is_invalid() {
            return None;
        }
        if !x.is_type() {
            let msg = format!("{} is not a type", self.describe(&x));
            self.error(e.span(), ErrorKind::NotAType, msg);
            return None;
        }
        x.ty
    }

    /// Check a call, conversion or builtin call.
    pub fn call<'ast>(&mut self, call: &'ast CallExpr<'ast>) -> Operand<'ast> {
        calls::check_call(self, call)
    }

    /// Check a selector expression `base.name`.
    pub fn selector<'ast>(&mut self, sel: &'ast SelectorExpr<'ast>) -> Operand<'ast> {
        selector::check_selector(self, sel)
    }

    /// Check passing `x` to parameter `position` of `sig`.
    ///
    /// With `spread` the argument was followed by `...`. On failure a
    /// diagnostic is reported and `x` becomes invalid.
    pub fn argument(&mut self, sig: &Signature, position: usize, x: &mut Operand<'_>, spread: bool) {
        arguments::check_argument(self, sig, position, x, spread);
    }

    /// Convert the single argument of `call` to `target`.
    pub fn conversion<'ast>(&mut self, call: &'ast CallExpr<'ast>, target: TypeId) -> Operand<'ast> {
        crate::conversion::check_conversion(self, call, target)
    }

    /// Check a call of the builtin `id`.
    pub fn builtin<'ast>(&mut self, call: &'ast CallExpr<'ast>, id: BuiltinId) -> Operand<'ast> {
        crate::builtin::check_builtin(self, call, id)
    }

    /// Whether `x` can be assigned to a variable of type `target`.
    ///
    /// On success untyped operands take their final type. Nothing is
    /// reported; the caller decides how to word the failure.
    pub fn assignment(&mut self, x: &mut Operand<'_>, target: TypeId) -> bool {
        crate::assignment::assign(self.types(), x, target)
    }

    // =========================================================================
    // Leaf forms
    // =========================================================================

    fn ident<'ast>(&mut self, ident: &'ast IdentExpr<'ast>) -> Operand<'ast> {
        let e = Expr::Ident(*ident);
        if ident.is_blank() {
            self.error(ident.span, ErrorKind::BlankIdentifierUse, "cannot use _ as value");
            return Operand::invalid(e);
        }
        let Some((_, id)) = self.registry().lookup_parent(self.scope(), ident.name) else {
            let msg = format!("undeclared name: {}", ident.name);
            self.error(ident.span, ErrorKind::UndeclaredName, msg);
            return Operand::invalid(e);
        };
        self.record_use(ident.span, id);

        match &self.registry().object(id).kind {
            ObjectKind::Constant { ty, value } => Operand::constant(e, *ty, value.clone()),
            ObjectKind::TypeName { ty } => Operand::type_expr(e, *ty),
            ObjectKind::Variable { ty, .. } => Operand::variable(e, *ty),
            ObjectKind::Function { ty, .. } => Operand::value(e, *ty),
            ObjectKind::Package { .. } => {
                let msg = format!("use of package {} not in selector", ident.name);
                self.error(ident.span, ErrorKind::PackageNotInSelector, msg);
                Operand::invalid(e)
            }
        }
    }

    /// `*x`: a pointer type, or the variable `x` points to.
    fn star<'ast>(&mut self, e: &'ast Expr<'ast>, operand: &'ast Expr<'ast>) -> Operand<'ast> {
        let x = self.expr_or_type(operand);
        let Some(ty) = x.ty.filter(|_| !x.is_invalid()) else {
            return Operand::invalid(*e);
        };
        if x.is_type() {
            let ptr = self.types_mut().pointer_to(ty);
            return Operand::type_expr(*e, ptr);
        }
        let base = match self.types().ty(underlying(self.types(), ty)) {
            Type::Pointer(base) => Some(*base),
            _ => None,
        };
        match base {
            Some(base) => Operand::variable(*e, base),
            None => {
                let msg = format!("invalid operation: cannot indirect {}", self.describe(&x));
                self.error(e.span(), ErrorKind::InvalidIndirection, msg);
                Operand::invalid(*e)
            }
        }
    }

    fn unary<'ast>(&mut self, unary: &'ast UnaryExpr<'ast>) -> Operand<'ast> {
        let e = Expr::Unary(unary);
        match unary.op {
            UnaryOp::Addr => {
                let x = self.expr(unary.operand);
                if x.is_invalid() {
                    return Operand::invalid(e);
                }
                if !x.is_variable() {
                    let msg = format!("cannot take address of {}", self.describe(&x));
                    self.error(unary.span, ErrorKind::CannotTakeAddress, msg);
                    return Operand::invalid(e);
                }
                let ptr = self.types_mut().pointer_to(x.type_or_invalid());
                Operand::value(e, ptr)
            }
        }
    }
}

/// Literals are untyped constants.
fn literal<'ast>(lit: &'ast LiteralExpr<'ast>) -> Operand<'ast> {
    let e = Expr::BasicLit(*lit);
    let (kind, value) = match lit.kind {
        LiteralKind::Int(v) => (BasicKind::UntypedInt, ConstValue::Int(v)),
        LiteralKind::Float(v) => (BasicKind::UntypedFloat, ConstValue::float(v)),
        LiteralKind::Rune(c) => (BasicKind::UntypedRune, ConstValue::Int(c as i128)),
        LiteralKind::String(s) => (BasicKind::UntypedString, ConstValue::String(s.to_string())),
    };
    Operand::constant(e, kind.type_id(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use bumpalo::Bump;
    use gocheck_ast::AstBuilder;

    #[test]
    fn identifiers_take_their_object_mode() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        let p = checker.expr(b.ident("p"));
        assert_eq!(p.mode, OperandMode::Variable);
        assert_eq!(p.ty, Some(fx.point));

        let t = checker.expr_or_type(b.ident("Point"));
        assert!(t.is_type());

        let limit = checker.expr(b.ident("Limit"));
        assert_eq!(limit.value_of(), Some(&ConstValue::Int(10)));

        let f = checker.expr(b.ident("pair"));
        assert_eq!(f.mode, OperandMode::Value);
        assert!(checker.finish().is_success());
    }

    #[test]
    fn bad_identifiers() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        assert!(checker.expr(b.ident("nope")).is_invalid());
        assert!(checker.expr(b.ident("_")).is_invalid());
        assert!(checker.expr(b.ident("lib")).is_invalid());
        assert!(checker.expr(b.ident("Point")).is_invalid());
        let out = checker.finish();
        assert_eq!(
            out.diagnostics.kinds(),
            vec![
                ErrorKind::UndeclaredName,
                ErrorKind::BlankIdentifierUse,
                ErrorKind::PackageNotInSelector,
                ErrorKind::NotAnExpression,
            ]
        );
    }

    #[test]
    fn literals_are_untyped_constants() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let x = literal(match b.rune('a') {
            Expr::BasicLit(lit) => lit,
            _ => unreachable!(),
        });
        assert_eq!(x.ty, Some(BasicKind::UntypedRune.type_id()));
        assert_eq!(x.value_of(), Some(&ConstValue::Int(97)));
    }

    #[test]
    fn star_and_address() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        let deref = checker.expr(b.star(b.ident("pp")));
        assert_eq!(deref.mode, OperandMode::Variable);
        assert_eq!(deref.ty, Some(fx.point));

        let ptr_type = checker.expr_or_type(b.star(b.ident("Point")));
        assert!(ptr_type.is_type());
        assert_eq!(ptr_type.ty, Some(fx.point_ptr));

        let addr = checker.expr(b.addr(b.ident("p")));
        assert_eq!(addr.ty, Some(fx.point_ptr));

        assert!(checker.expr(b.star(b.ident("n"))).is_invalid());
        assert!(checker.expr(b.addr(b.int(1))).is_invalid());
        let out = checker.finish();
        assert_eq!(
            out.diagnostics.kinds(),
            vec![ErrorKind::InvalidIndirection, ErrorKind::CannotTakeAddress]
        );
    }

    #[test]
    fn slice_types() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        let strings = checker.expr_or_type(b.slice_type(b.ident("string")));
        assert_eq!(strings.ty, Some(fx.strings));
        let ints = checker.expr_or_type(b.slice_type(b.ident("int")));
        assert!(ints.is_type());
        assert!(ints.ty.is_some_and(|ty| ty.is_local()));

        assert!(checker.expr_or_type(b.slice_type(b.ident("n"))).is_invalid());
        assert_eq!(checker.finish().diagnostics.kinds(), vec![ErrorKind::NotAType]);
    }

    #[test]
    fn recorded_types() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = crate::Checker::with_config(
            &fx.registry,
            fx.main,
            crate::CheckerConfig::new().record_types(true),
        );
        checker.set_scope(fx.body);
        let n = b.ident("n");
        let call = b.paren(n);
        checker.expr(call);
        let out = checker.finish();
        let tv = out.info.type_at(n.span()).expect("recorded");
        assert_eq!(tv.mode, OperandMode::Variable);
        assert_eq!(tv.ty, Some(BasicKind::Int.type_id()));
        assert!(out.info.type_at(call.span()).is_some());
    }
}
