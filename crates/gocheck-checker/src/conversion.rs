//! Explicit conversions `T(x)`.
//!
//! [`find_conversion`] classifies how a value of one type converts to
//! another; [`check_conversion`] checks a call whose callee is a type.
//! Constant arguments converted to a basic type stay constant.

use gocheck_ast::{CallExpr, Expr};
use gocheck_core::predicates::{basic_kind, default_type, identical, is_untyped, slice_elem, underlying};
use gocheck_core::{BasicKind, ConstValue, ErrorKind, Symbols, Type, TypeId};

use crate::assignment::assign;
use crate::checker::Checker;
use crate::operand::{Operand, OperandMode};

/// The rule that allows a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// The value is assignable to the target.
    Assignable,
    /// Both types have identical underlying types.
    Underlying,
    /// Unnamed pointers whose base types have identical underlying types.
    Pointer,
    /// Between integer and floating-point types.
    Numeric,
    /// An integer, `[]byte` or `[]rune` to a string type.
    ToString,
    /// A string to `[]byte` or `[]rune`.
    FromString,
}

/// How a value of type `v` converts to `t`, if it does at all.
pub fn find_conversion<S: Symbols + ?Sized>(symbols: &S, v: TypeId, t: TypeId) -> Option<ConversionKind> {
    let v = default_type(symbols, v);
    if crate::assignment::assignable_to(symbols, v, t) {
        return Some(ConversionKind::Assignable);
    }
    let (vu, tu) = (underlying(symbols, v), underlying(symbols, t));
    if identical(symbols, vu, tu) {
        return Some(ConversionKind::Underlying);
    }
    if let (Type::Pointer(vb), Type::Pointer(tb)) = (symbols.ty(v), symbols.ty(t))
        && identical(symbols, underlying(symbols, *vb), underlying(symbols, *tb))
    {
        return Some(ConversionKind::Pointer);
    }

    let (vk, tk) = (basic_kind(symbols, v), basic_kind(symbols, t));
    if vk.is_some_and(BasicKind::is_numeric) && tk.is_some_and(BasicKind::is_numeric) {
        return Some(ConversionKind::Numeric);
    }
    if tk.is_some_and(BasicKind::is_string) && (vk.is_some_and(BasicKind::is_integer) || is_bytes_or_runes(symbols, v)) {
        return Some(ConversionKind::ToString);
    }
    if vk.is_some_and(BasicKind::is_string) && is_bytes_or_runes(symbols, t) {
        return Some(ConversionKind::FromString);
    }
    None
}

fn is_bytes_or_runes<S: Symbols + ?Sized>(symbols: &S, ty: TypeId) -> bool {
    slice_elem(symbols, ty)
        .and_then(|elem| basic_kind(symbols, elem))
        .is_some_and(|k| matches!(k, BasicKind::Uint8 | BasicKind::Int32))
}

/// Check the conversion `T(x)` for a call whose callee denotes `target`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub(crate) fn check_conversion<'ast>(checker: &mut Checker<'_>, call: &'ast CallExpr<'ast>, target: TypeId) -> Operand<'ast> {
    let e = Expr::Call(call);

    let arg = match call.args {
        [arg] => arg,
        [] => {
            let msg = format!("missing argument in conversion to {}", checker.type_string(target));
            checker.error(call.span, ErrorKind::MissingConversionArgument, msg);
            return Operand::invalid(e);
        }
        [_, extra, ..] => {
            let msg = format!("too many arguments in conversion to {}", checker.type_string(target));
            checker.error(extra.span(), ErrorKind::TooManyConversionArguments, msg);
            for arg in call.args {
                checker.expr(arg);
            }
            return Operand::invalid(e);
        }
    };
    if let Some(ellipsis) = call.ellipsis {
        let msg = format!("invalid use of ... in conversion to {}", checker.type_string(target));
        checker.error(ellipsis, ErrorKind::InvalidConversion, msg);
        checker.expr(arg);
        return Operand::invalid(e);
    }

    let mut x = checker.expr(arg);
    if x.is_invalid() {
        return Operand::invalid(e);
    }

    let types = checker.types();
    let target_kind = basic_kind(types, target).filter(|k| k.info().intersects(gocheck_core::BasicInfo::CONST_TYPE));
    let result = match (x.value_of(), target_kind) {
        // Constant conversions to a basic type yield a constant.
        (Some(value), Some(kind)) => constant_conversion(value, kind).map(OperandMode::Constant),
        _ => {
            let v = x.type_or_invalid();
            let ok = if is_untyped(types, v) {
                let mut probe = x.clone();
                assign(types, &mut probe, target) || find_conversion(types, v, target).is_some()
            } else {
                find_conversion(types, v, target).is_some()
            };
            ok.then_some(OperandMode::Value)
        }
    };

    match result {
        Some(mode) => {
            x.mode = mode;
            x.ty = Some(target);
            x.expr = Some(e);
            x
        }
        None => {
            let msg = format!("cannot convert {} to type {}", checker.describe(&x), checker.type_string(target));
            checker.error(call.span, ErrorKind::InvalidConversion, msg);
            Operand::invalid(e)
        }
    }
}

/// Convert a constant to a basic type, or `None` if it does not fit.
fn constant_conversion(value: &ConstValue, kind: BasicKind) -> Option<ConstValue> {
    if let Some(converted) = value.representable_as(kind) {
        return Some(converted);
    }
    match value {
        // string(65) == "A"; out of range code points become U+FFFD.
        ConstValue::Int(code) if kind.is_string() => {
            let c = u32::try_from(*code)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            Some(ConstValue::String(c.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use bumpalo::Bump;
    use gocheck_ast::AstBuilder;

    #[test]
    fn conversion_rules() {
        let fx = Fixture::new();
        let mut registry = fx.registry.clone();
        let int = BasicKind::Int.type_id();
        let string = BasicKind::String.type_id();
        let scope = registry.package_scope(fx.main);
        let celsius = registry.declare_named(scope, "Celsius", BasicKind::Float64.type_id()).expect("declared");
        let runes = registry.slice_of(BasicKind::Int32.type_id());
        let bytes = registry.slice_of(BasicKind::Uint8.type_id());

        assert_eq!(find_conversion(&registry, int, int), Some(ConversionKind::Assignable));
        assert_eq!(
            find_conversion(&registry, BasicKind::Float64.type_id(), celsius),
            Some(ConversionKind::Underlying)
        );
        assert_eq!(find_conversion(&registry, int, celsius), Some(ConversionKind::Numeric));
        assert_eq!(find_conversion(&registry, int, string), Some(ConversionKind::ToString));
        assert_eq!(find_conversion(&registry, runes, string), Some(ConversionKind::ToString));
        assert_eq!(find_conversion(&registry, string, bytes), Some(ConversionKind::FromString));
        assert_eq!(find_conversion(&registry, string, int), None);
        assert_eq!(find_conversion(&registry, fx.point, fx.circle), None);
    }

    #[test]
    fn constant_conversions() {
        assert_eq!(
            constant_conversion(&ConstValue::Int(65), BasicKind::String),
            Some(ConstValue::String("A".into()))
        );
        assert_eq!(
            constant_conversion(&ConstValue::Int(-1), BasicKind::String),
            Some(ConstValue::String("\u{FFFD}".into()))
        );
        assert_eq!(constant_conversion(&ConstValue::Int(256), BasicKind::Uint8), None);
        // Constants never truncate.
        assert_eq!(constant_conversion(&ConstValue::float(2.7), BasicKind::Int), None);
        assert_eq!(constant_conversion(&ConstValue::float(2.0), BasicKind::Int), Some(ConstValue::Int(2)));
    }

    #[test]
    fn conversion_calls() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        let x = checker.expr(b.call(b.ident("int64"), &[b.ident("n")]));
        assert_eq!(x.mode, OperandMode::Value);
        assert_eq!(x.ty, Some(BasicKind::Int64.type_id()));

        let c = checker.expr(b.call(b.ident("uint8"), &[b.int(200)]));
        assert_eq!(c.value_of(), Some(&ConstValue::Int(200)));

        let s = checker.expr(b.call(b.slice_type(b.ident("byte")), &[b.string("hi")]));
        assert_eq!(s.mode, OperandMode::Value);
        assert!(checker.diagnostics().is_empty());

        checker.expr(b.call(b.ident("int"), &[]));
        checker.expr(b.call(b.ident("int"), &[b.int(1), b.int(2)]));
        checker.expr(b.call(b.ident("uint8"), &[b.int(256)]));
        checker.expr(b.call(b.ident("Point"), &[b.ident("n")]));
        assert_eq!(
            checker.finish().diagnostics.kinds(),
            vec![
                ErrorKind::MissingConversionArgument,
                ErrorKind::TooManyConversionArguments,
                ErrorKind::InvalidConversion,
                ErrorKind::InvalidConversion,
            ]
        );
    }
}
