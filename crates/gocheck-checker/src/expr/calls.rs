//! Call expressions.
//!
//! A call `f(args)` is one of three things, decided by what the callee
//! denotes:
//! - a conversion when the callee is a type: `T(x)`
//! - a function or method call when its type is a signature
//! - a builtin call when it names a predeclared function: `len(s)`

use gocheck_ast::{CallExpr, Expr};
use gocheck_core::predicates::underlying;
use gocheck_core::{ErrorKind, Signature, Symbols, Type};

use crate::checker::Checker;
use crate::operand::Operand;

/// Check a call, conversion, or builtin call.
#[tracing::instrument(level = "trace", skip_all, fields(callee = %call.callee, args = call.args.len()))]
#[cfg_attr(feature = "profiling", profiling::function)]
pub(super) fn check_call<'ast>(checker: &mut Checker<'_>, call: &'ast CallExpr<'ast>) -> Operand<'ast> {
    let e = Expr::Call(call);
    let callee = checker.expr_or_type(call.callee);

    if callee.is_invalid() {
        // Still check the arguments for their own errors and recordings.
        for arg in call.args {
            checker.expr(arg);
        }
        return Operand::invalid(e);
    }

    let Some(ty) = callee.ty else {
        return Operand::invalid(e);
    };
    if callee.is_type() {
        return checker.conversion(call, ty);
    }

    let types = checker.types();
    if let Some(sig) = types.ty(underlying(types, ty)).as_signature() {
        let sig = sig.clone();
        return function_call(checker, call, &sig);
    }
    if let Type::Builtin(id) = types.ty(ty) {
        let id = *id;
        return checker.builtin(call, id);
    }

    let msg = format!("invalid operation: cannot call non-function {}", checker.describe(&callee));
    checker.error(callee.span(), ErrorKind::NotCallable, msg);
    Operand::invalid(e)
}

/// Check the arguments of a call of a function with signature `sig`.
fn function_call<'ast>(checker: &mut Checker<'_>, call: &'ast CallExpr<'ast>, sig: &Signature) -> Operand<'ast> {
    let e = Expr::Call(call);

    let mut spread = false;
    if let Some(ellipsis) = call.ellipsis {
        if sig.variadic {
            spread = true;
        } else {
            let msg = format!("cannot use ... in call to non-variadic {}", call.callee);
            checker.error(ellipsis, ErrorKind::SpreadOnNonVariadic, msg);
        }
    }

    let params = sig.params.len();
    let mut n = call.args.len();

    if let [arg] = call.args {
        // A single argument may be a call returning several values.
        let mut x = checker.expr(arg);
        if x.is_invalid() {
            // Avoid a follow-up arity error.
            n = params;
        } else if let Some(vars) = checker.types().ty(x.type_or_invalid()).as_tuple() {
            let components: Vec<_> = vars.iter().map(|v| v.ty).collect();
            n = components.len();
            for (i, ty) in components.into_iter().enumerate() {
                let mut component = Operand::value(*arg, ty);
                checker.argument(sig, i, &mut component, spread && i + 1 == n);
            }
        } else {
            checker.argument(sig, 0, &mut x, spread);
        }
    } else {
        for (i, arg) in call.args.iter().enumerate() {
            let mut x = checker.expr(arg);
            if !x.is_invalid() {
                checker.argument(sig, i, &mut x, spread && i + 1 == n);
            }
        }
    }

    // A variadic function accepts an empty last argument.
    if sig.variadic {
        n += 1;
    }
    if n < params {
        let msg = format!("too few arguments in call to {}", call.callee);
        checker.error(call.span, ErrorKind::TooFewArguments, msg);
    }

    match sig.results.as_slice() {
        [] => Operand::no_value(e),
        [result] => Operand::value(e, result.ty),
        results => {
            let tuple = checker.types_mut().tuple(results.to_vec());
            Operand::value(e, tuple)
        }
    }
}
