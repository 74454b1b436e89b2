//! Operands - the result of evaluating an expression.
//!
//! An [`Operand`] pairs an [`OperandMode`] with a type and the expression it
//! came from. Checking never fails with `Err`: a failed evaluation yields an
//! operand in [`OperandMode::Invalid`] after a diagnostic was reported, and
//! every consumer treats such operands as already handled.

use gocheck_ast::Expr;
use gocheck_core::{BasicKind, ConstValue, PackageId, Span, Symbols, TypeId, type_string};

/// What kind of entity an expression denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperandMode {
    /// Evaluation failed; a diagnostic has been reported.
    Invalid,
    /// A call of a function without results.
    NoValue,
    /// A compile-time constant with its value.
    Constant(ConstValue),
    /// An addressable value.
    Variable,
    /// A type, e.g. `T` in `T(x)` or `T.Method`.
    TypeExpr,
    /// A computed value that is not addressable.
    Value,
}

impl OperandMode {
    pub fn is_invalid(&self) -> bool {
        matches!(self, OperandMode::Invalid)
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, OperandMode::Constant(_))
    }
}

/// The result of checking an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand<'ast> {
    pub mode: OperandMode,
    /// `None` only for invalid and no-value operands.
    pub ty: Option<TypeId>,
    /// The expression that produced this operand.
    pub expr: Option<Expr<'ast>>,
}

impl<'ast> Operand<'ast> {
    pub fn invalid(expr: Expr<'ast>) -> Self {
        Self {
            mode: OperandMode::Invalid,
            ty: None,
            expr: Some(expr),
        }
    }

    pub fn no_value(expr: Expr<'ast>) -> Self {
        Self {
            mode: OperandMode::NoValue,
            ty: None,
            expr: Some(expr),
        }
    }

    pub fn value(expr: Expr<'ast>, ty: TypeId) -> Self {
        Self::with_mode(expr, OperandMode::Value, ty)
    }

    pub fn variable(expr: Expr<'ast>, ty: TypeId) -> Self {
        Self::with_mode(expr, OperandMode::Variable, ty)
    }

    pub fn type_expr(expr: Expr<'ast>, ty: TypeId) -> Self {
        Self::with_mode(expr, OperandMode::TypeExpr, ty)
    }

    pub fn constant(expr: Expr<'ast>, ty: TypeId, value: ConstValue) -> Self {
        Self::with_mode(expr, OperandMode::Constant(value), ty)
    }

    pub fn with_mode(expr: Expr<'ast>, mode: OperandMode, ty: TypeId) -> Self {
        Self {
            mode,
            ty: Some(ty),
            expr: Some(expr),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.mode.is_invalid()
    }

    pub fn is_type(&self) -> bool {
        self.mode == OperandMode::TypeExpr
    }

    pub fn is_variable(&self) -> bool {
        self.mode == OperandMode::Variable
    }

    /// The constant value, for constant operands.
    pub fn value_of(&self) -> Option<&ConstValue> {
        match &self.mode {
            OperandMode::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// The operand's type, or the invalid type when it has none.
    pub fn type_or_invalid(&self) -> TypeId {
        self.ty.unwrap_or(BasicKind::Invalid.type_id())
    }

    /// Mark the operand as failed. Its expression is kept for later messages.
    pub fn invalidate(&mut self) {
        self.mode = OperandMode::Invalid;
        self.ty = None;
    }

    pub fn span(&self) -> Span {
        self.expr.map(|e| e.span()).unwrap_or_default()
    }

    /// Describe the operand for a diagnostic, e.g. `x (variable of type int)`.
    pub fn describe<S: Symbols + ?Sized>(&self, symbols: &S, relative_to: Option<PackageId>) -> String {
        let text = self.expr.map(|e| e.to_string()).unwrap_or_else(|| "<expr>".to_string());
        let ty = self.ty.map(|ty| type_string(symbols, ty, relative_to));
        let untyped = self
            .ty
            .is_some_and(|ty| gocheck_core::predicates::is_untyped(symbols, ty));

        match (&self.mode, ty) {
            (OperandMode::Invalid, _) => format!("{text} (invalid operand)"),
            (OperandMode::NoValue, _) => format!("{text} (no value)"),
            (OperandMode::TypeExpr, _) => format!("{text} (type)"),
            (OperandMode::Constant(ConstValue::Nil), _) => "nil".to_string(),
            (OperandMode::Constant(value), Some(ty)) => {
                let shown = value.to_string();
                match (untyped, shown == text) {
                    (true, true) => format!("{text} ({ty} constant)"),
                    (true, false) => format!("{text} ({ty} constant {shown})"),
                    (false, true) => format!("{text} (constant of type {ty})"),
                    (false, false) => format!("{text} (constant {shown} of type {ty})"),
                }
            }
            (OperandMode::Variable, Some(ty)) => format!("{text} (variable of type {ty})"),
            (OperandMode::Value, Some(ty)) if untyped => format!("{text} ({ty} value)"),
            (OperandMode::Value, Some(ty)) => format!("{text} (value of type {ty})"),
            (_, None) => text,
        }
    }
}
