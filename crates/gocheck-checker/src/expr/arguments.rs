//! Passing one argument to one parameter.

use gocheck_core::predicates::{basic_kind, slice_elem};
use gocheck_core::{BasicKind, ErrorKind, Signature, Symbols};

use crate::assignment::missing_method;
use crate::checker::Checker;
use crate::operand::Operand;

/// Check passing `x` as the argument at `position` of a call of `sig`.
///
/// Arguments past the last parameter of a variadic signature are matched
/// against the variadic parameter's element type, unless the argument is
/// spread (`xs...`), in which case the slice itself is passed.
pub(super) fn check_argument(checker: &mut Checker<'_>, sig: &Signature, position: usize, x: &mut Operand<'_>, spread: bool) {
    let n = sig.params.len();

    let mut expected = if position < n {
        sig.params[position].ty
    } else if let Some(param) = sig.variadic_param() {
        param.ty
    } else {
        checker.error(x.span(), ErrorKind::TooManyArguments, "too many arguments");
        x.invalidate();
        return;
    };

    if checker.types().ty(x.type_or_invalid()).as_tuple().is_some() {
        let msg = format!("multiple-value {} in single-value context", checker.describe(x));
        checker.error(x.span(), ErrorKind::ArgumentTypeMismatch, msg);
        x.invalidate();
        return;
    }

    if spread {
        if position + 1 != n {
            checker.error(
                x.span(),
                ErrorKind::SpreadPositionMismatch,
                "can only use ... with matching parameter",
            );
            x.invalidate();
            return;
        }
        let ty = x.type_or_invalid();
        let types = checker.types();
        let is_slice = slice_elem(types, ty).is_some() || basic_kind(types, ty) == Some(BasicKind::UntypedNil);
        let before = checker.describe(x);
        if !is_slice || !checker.assignment(x, expected) {
            let msg = format!("cannot use {} as parameter of type {}", before, checker.type_string(expected));
            checker.error(x.span(), ErrorKind::SpreadTypeMismatch, msg);
            x.invalidate();
        }
        return;
    }

    if sig.variadic && position + 1 >= n {
        // Individual arguments match the element type.
        expected = slice_elem(checker.types(), expected).unwrap_or(expected);
    }

    let before = checker.describe(x);
    if !checker.assignment(x, expected) && !x.is_invalid() {
        let mut msg = format!(
            "cannot use {} as {} value in argument",
            before,
            checker.type_string(expected)
        );
        if let Some(method) = missing_method(checker.types(), x.type_or_invalid(), expected) {
            msg.push_str(&format!(
                ": {} does not implement {} (missing method {})",
                checker.type_string(x.type_or_invalid()),
                checker.type_string(expected),
                method
            ));
        }
        checker.error(x.span(), ErrorKind::ArgumentTypeMismatch, msg);
        x.invalidate();
    }
}
