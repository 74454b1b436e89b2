//! Assignability.
//!
//! A value `x` of type `V` is assignable to a variable of type `T` when
//! - `V` and `T` are identical
//! - `V` and `T` have identical underlying types and at least one of them is
//!   not named
//! - `T` is an interface type and `V` implements it
//! - `x` is the untyped `nil` and `T` is a pointer, slice, function or
//!   interface type
//! - `x` is an untyped constant representable by a value of type `T`

use gocheck_core::predicates::{default_type, identical, is_interface, is_named, ptr_recv, underlying};
use gocheck_core::{BasicKind, ObjectKind, Symbols, Type, TypeId};

use crate::lookup::{LookupResult, lookup_field_or_method};
use crate::operand::{Operand, OperandMode};

/// Check `x` against `target`, giving untyped operands their final type.
///
/// `x` is only changed when the assignment is valid.
pub fn assign<S: Symbols + ?Sized>(symbols: &S, x: &mut Operand<'_>, target: TypeId) -> bool {
    if matches!(x.mode, OperandMode::Invalid | OperandMode::NoValue | OperandMode::TypeExpr) {
        return false;
    }
    let Some(ty) = x.ty else {
        return false;
    };
    if symbols.ty(target).is_invalid() {
        // Already reported wherever the target came from.
        return true;
    }

    if let Type::Basic(kind) = symbols.ty(ty)
        && kind.is_untyped()
    {
        return assign_untyped(symbols, x, *kind, target);
    }
    assignable_to(symbols, ty, target)
}

fn assign_untyped<S: Symbols + ?Sized>(symbols: &S, x: &mut Operand<'_>, kind: BasicKind, target: TypeId) -> bool {
    match symbols.ty(underlying(symbols, target)) {
        Type::Basic(target_kind) => {
            if kind == BasicKind::UntypedNil {
                return *target_kind == BasicKind::UntypedNil;
            }
            let converted = match &x.mode {
                OperandMode::Constant(value) => match value.representable_as(*target_kind) {
                    Some(value) => OperandMode::Constant(value),
                    None => return false,
                },
                // Untyped non-constant values only keep their class.
                mode if same_class(kind, *target_kind) => mode.clone(),
                _ => return false,
            };
            x.mode = converted;
            x.ty = Some(target);
            true
        }
        Type::Pointer(_) | Type::Slice(_) | Type::Signature(_) if kind == BasicKind::UntypedNil => {
            x.mode = OperandMode::Value;
            x.ty = Some(target);
            true
        }
        Type::Interface(_) => {
            if kind == BasicKind::UntypedNil {
                x.mode = OperandMode::Value;
                x.ty = Some(target);
                return true;
            }
            // Untyped constants take their default type first.
            let default = default_type(symbols, x.type_or_invalid());
            if !assignable_to(symbols, default, target) {
                return false;
            }
            let value = match (&x.mode, symbols.ty(default)) {
                (OperandMode::Constant(value), Type::Basic(default_kind)) => match value.representable_as(*default_kind) {
                    Some(value) => Some(value),
                    None => return false,
                },
                _ => None,
            };
            if let Some(value) = value {
                x.mode = OperandMode::Constant(value);
            }
            x.ty = Some(default);
            true
        }
        _ => false,
    }
}

fn same_class(a: BasicKind, b: BasicKind) -> bool {
    (a.is_boolean() && b.is_boolean()) || (a.is_numeric() && b.is_numeric()) || (a.is_string() && b.is_string())
}

/// Assignability of a typed value of type `v` to `t`.
pub fn assignable_to<S: Symbols + ?Sized>(symbols: &S, v: TypeId, t: TypeId) -> bool {
    if identical(symbols, v, t) {
        return true;
    }
    let (vu, tu) = (underlying(symbols, v), underlying(symbols, t));
    if identical(symbols, vu, tu) && (!is_named(symbols, v) || !is_named(symbols, t)) {
        return true;
    }
    if is_interface(symbols, t) {
        return missing_method(symbols, v, t).is_none();
    }
    false
}

/// The first method of interface `iface` that `v` lacks.
///
/// `None` when `v` implements `iface`, or when `iface` is not an interface.
/// A method counts as missing if `v` only has it with a pointer receiver or
/// with a different signature.
pub fn missing_method<S: Symbols + ?Sized>(symbols: &S, v: TypeId, iface: TypeId) -> Option<String> {
    let Type::Interface(it) = symbols.ty(underlying(symbols, iface)) else {
        return None;
    };
    for &method in &it.methods {
        let wanted = symbols.object(method);
        let Some(wanted_ty) = wanted.ty() else {
            continue;
        };
        let satisfied = match lookup_field_or_method(symbols, v, wanted.pkg, &wanted.name) {
            LookupResult::Found(member) => match &symbols.object(member.object).kind {
                ObjectKind::Function { ty, .. } => {
                    (member.indirect || !ptr_recv(symbols, member.object)) && identical(symbols, *ty, wanted_ty)
                }
                _ => false,
            },
            LookupResult::Ambiguous { .. } | LookupResult::NotFound => false,
        };
        if !satisfied {
            return Some(wanted.name.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use bumpalo::Bump;
    use gocheck_ast::AstBuilder;
    use gocheck_core::ConstValue;

    #[test]
    fn named_and_unnamed() {
        let fx = Fixture::new();
        let mut registry = fx.registry.clone();
        let scope = registry.package_scope(fx.main);
        let names = registry.declare_named(scope, "Names", fx.strings).expect("declared");
        let other = registry.declare_named(scope, "Other", fx.strings).expect("declared");

        assert!(assignable_to(&registry, fx.strings, names));
        assert!(assignable_to(&registry, names, fx.strings));
        assert!(!assignable_to(&registry, names, other));
        assert!(!assignable_to(&registry, BasicKind::Int.type_id(), BasicKind::Int64.type_id()));
    }

    #[test]
    fn interfaces() {
        let fx = Fixture::new();
        let mut registry = fx.registry.clone();
        let error = registry.universe_type("error").expect("error");
        let my_err_ptr = registry.pointer_to(fx.my_err);

        assert!(assignable_to(&registry, my_err_ptr, error));
        assert!(!assignable_to(&registry, fx.my_err, error));
        assert_eq!(missing_method(&registry, fx.my_err, error), Some("Error".to_string()));
        assert_eq!(missing_method(&registry, fx.point, error), Some("Error".to_string()));
        assert_eq!(missing_method(&registry, fx.point, fx.point), None);
        // An interface value satisfies itself.
        assert!(assignable_to(&registry, fx.shape, fx.shape));
    }

    #[test]
    fn untyped_constants() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let untyped_int = BasicKind::UntypedInt.type_id();

        let mut x = Operand::constant(*b.int(300), untyped_int, ConstValue::Int(300));
        assert!(!assign(&fx.registry, &mut x, BasicKind::Uint8.type_id()));
        assert_eq!(x.ty, Some(untyped_int));
        assert!(assign(&fx.registry, &mut x, BasicKind::Float64.type_id()));
        assert_eq!(x.ty, Some(BasicKind::Float64.type_id()));
        assert_eq!(x.value_of(), Some(&ConstValue::float(300.0)));

        let mut s = Operand::constant(*b.string("x"), BasicKind::UntypedString.type_id(), ConstValue::String("x".into()));
        assert!(!assign(&fx.registry, &mut s, BasicKind::Int.type_id()));
    }

    #[test]
    fn untyped_to_interface_takes_default_type() {
        let fx = Fixture::new();
        let mut registry = fx.registry.clone();
        let any = registry.new_interface(None, &[]).expect("interface");
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);

        let mut r = Operand::constant(*b.rune('x'), BasicKind::UntypedRune.type_id(), ConstValue::Int(120));
        assert!(assign(&registry, &mut r, any));
        assert_eq!(r.ty, Some(BasicKind::Int32.type_id()));

        let mut one = Operand::constant(*b.int(1), BasicKind::UntypedInt.type_id(), ConstValue::Int(1));
        assert!(!assign(&registry, &mut one, fx.shape));
    }

    #[test]
    fn nil() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let nil = || Operand::constant(*b.ident("nil"), BasicKind::UntypedNil.type_id(), ConstValue::Nil);

        for target in [fx.point_ptr, fx.strings, fx.shape] {
            let mut x = nil();
            assert!(assign(&fx.registry, &mut x, target));
            assert_eq!(x.mode, OperandMode::Value);
            assert_eq!(x.ty, Some(target));
        }
        assert!(!assign(&fx.registry, &mut nil(), fx.point));
        assert!(!assign(&fx.registry, &mut nil(), BasicKind::Int.type_id()));
    }
}
