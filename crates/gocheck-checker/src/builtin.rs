//! Calls of predeclared functions.
//!
//! Arity is checked from [`BuiltinId::info`] before any argument-specific
//! rule; failed calls still evaluate their arguments so errors inside them
//! are reported.

use gocheck_ast::{CallExpr, Expr};
use gocheck_core::predicates::{basic_kind, identical, slice_elem};
use gocheck_core::{BasicKind, BuiltinId, ConstValue, ErrorKind, Param, Signature};

use crate::checker::Checker;
use crate::operand::Operand;

/// Check a call of the builtin `id`.
#[tracing::instrument(level = "trace", skip_all, fields(builtin = id.name()))]
#[cfg_attr(feature = "profiling", profiling::function)]
pub(crate) fn check_builtin<'ast>(checker: &mut Checker<'_>, call: &'ast CallExpr<'ast>, id: BuiltinId) -> Operand<'ast> {
    let e = Expr::Call(call);
    let info = id.info();

    // append is the only builtin that accepts a spread argument.
    if let Some(ellipsis) = call.ellipsis
        && id != BuiltinId::Append
    {
        let msg = format!("invalid use of ... with built-in {}", info.name);
        checker.error(ellipsis, ErrorKind::InvalidBuiltinArgument, msg);
        use_args(checker, call.args);
        return Operand::invalid(e);
    }

    let nargs = call.args.len();
    if nargs < info.nargs || (!info.variadic && nargs > info.nargs) {
        let which = if nargs < info.nargs { "not enough" } else { "too many" };
        let msg = format!(
            "{which} arguments for {}(...) (expected {}, found {nargs})",
            info.name, info.nargs
        );
        checker.error(call.span, ErrorKind::WrongBuiltinArgumentCount, msg);
        use_args(checker, call.args);
        return Operand::invalid(e);
    }

    match id {
        BuiltinId::Len | BuiltinId::Cap => len_cap(checker, call, id),
        BuiltinId::Append => append(checker, call),
        BuiltinId::Copy => copy(checker, call),
        BuiltinId::New => match checker.type_expr(&call.args[0]) {
            Some(ty) => {
                let ptr = checker.types_mut().pointer_to(ty);
                Operand::value(e, ptr)
            }
            None => Operand::invalid(e),
        },
        BuiltinId::Panic => {
            checker.expr(&call.args[0]);
            Operand::no_value(e)
        }
        BuiltinId::Print | BuiltinId::Println => {
            for arg in call.args {
                let x = checker.expr(arg);
                if !x.is_invalid() && basic_kind(checker.types(), x.type_or_invalid()) == Some(BasicKind::UntypedNil) {
                    let msg = format!("use of untyped nil in argument to built-in {}", info.name);
                    checker.error(x.span(), ErrorKind::InvalidBuiltinArgument, msg);
                }
            }
            Operand::no_value(e)
        }
    }
}

/// Evaluate arguments of a call that already failed.
fn use_args<'ast>(checker: &mut Checker<'_>, args: &'ast [Expr<'ast>]) {
    for arg in args {
        checker.expr_or_type(arg);
    }
}

/// `len(x)` and `cap(x)`; `len` of a constant string is constant.
fn len_cap<'ast>(checker: &mut Checker<'_>, call: &'ast CallExpr<'ast>, id: BuiltinId) -> Operand<'ast> {
    let e = Expr::Call(call);
    let x = checker.expr(&call.args[0]);
    if x.is_invalid() {
        return Operand::invalid(e);
    }

    let int = BasicKind::Int.type_id();
    let types = checker.types();
    let ty = x.type_or_invalid();
    if id == BuiltinId::Len && basic_kind(types, ty).is_some_and(BasicKind::is_string) {
        return match x.value_of() {
            Some(ConstValue::String(s)) => Operand::constant(e, int, ConstValue::Int(s.len() as i128)),
            _ => Operand::value(e, int),
        };
    }
    if slice_elem(types, ty).is_some() {
        return Operand::value(e, int);
    }

    let msg = format!("invalid argument: {} for built-in {}", checker.describe(&x), id.name());
    checker.error(x.span(), ErrorKind::InvalidBuiltinArgument, msg);
    Operand::invalid(e)
}

/// `append(s S, x ...E) S` where `E` is the element type of `S`.
fn append<'ast>(checker: &mut Checker<'_>, call: &'ast CallExpr<'ast>) -> Operand<'ast> {
    let e = Expr::Call(call);
    let Some((first, rest)) = call.args.split_first() else {
        return Operand::invalid(e);
    };

    let s = checker.expr(first);
    let mut args: Vec<Operand<'ast>> = rest.iter().map(|arg| checker.expr(arg)).collect();
    if s.is_invalid() {
        return Operand::invalid(e);
    }

    let slice = s.type_or_invalid();
    let Some(elem) = slice_elem(checker.types(), slice) else {
        let msg = format!("invalid argument: {} (first argument to append must be a slice)", checker.describe(&s));
        checker.error(s.span(), ErrorKind::InvalidBuiltinArgument, msg);
        return Operand::invalid(e);
    };

    let spread = call.ellipsis.is_some();
    if spread && args.is_empty() {
        let msg = "can only use ... with final argument in list";
        checker.error(call.span, ErrorKind::InvalidBuiltinArgument, msg);
        return Operand::invalid(e);
    }

    // append([]byte, string...) is allowed as a special case.
    if spread
        && let [x] = args.as_slice()
        && !x.is_invalid()
        && basic_kind(checker.types(), elem) == Some(BasicKind::Uint8)
        && basic_kind(checker.types(), x.type_or_invalid()).is_some_and(BasicKind::is_string)
    {
        return Operand::value(e, slice);
    }

    let elems = checker.types_mut().slice_of(elem);
    let sig = Signature::new(
        vec![Param::unnamed(slice), Param::unnamed(elems)],
        vec![Param::unnamed(slice)],
        true,
    );
    let last = args.len();
    for (i, x) in args.iter_mut().enumerate() {
        if !x.is_invalid() {
            checker.argument(&sig, i + 1, x, spread && i + 1 == last);
        }
    }
    Operand::value(e, slice)
}

/// `copy(dst, src []E) int`; `src` may also be a string when `E` is `byte`.
fn copy<'ast>(checker: &mut Checker<'_>, call: &'ast CallExpr<'ast>) -> Operand<'ast> {
    let e = Expr::Call(call);
    let dst = checker.expr(&call.args[0]);
    let src = checker.expr(&call.args[1]);
    if dst.is_invalid() || src.is_invalid() {
        return Operand::invalid(e);
    }

    let types = checker.types();
    let dst_elem = slice_elem(types, dst.type_or_invalid());
    let src_elem = slice_elem(types, src.type_or_invalid()).or_else(|| {
        basic_kind(types, src.type_or_invalid())
            .filter(|k| k.is_string())
            .map(|_| BasicKind::Uint8.type_id())
    });

    let msg = match (dst_elem, src_elem) {
        (Some(d), Some(s)) if identical(types, d, s) => return Operand::value(e, BasicKind::Int.type_id()),
        (Some(_), Some(_)) => format!(
            "arguments to copy {} and {} have different element types",
            checker.describe(&dst),
            checker.describe(&src)
        ),
        _ => format!(
            "copy expects slice arguments; found {} and {}",
            checker.describe(&dst),
            checker.describe(&src)
        ),
    };
    checker.error(call.span, ErrorKind::InvalidBuiltinArgument, msg);
    Operand::invalid(e)
}

#[cfg(test)]
mod tests {
    use crate::fixture::Fixture;
    use crate::operand::OperandMode;
    use bumpalo::Bump;
    use gocheck_ast::AstBuilder;
    use gocheck_core::{BasicKind, ConstValue, ErrorKind};

    #[test]
    fn len_and_cap() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        let x = checker.expr(b.call(b.ident("len"), &[b.string("hello")]));
        assert_eq!(x.value_of(), Some(&ConstValue::Int(5)));
        assert_eq!(x.ty, Some(BasicKind::Int.type_id()));

        let y = checker.expr(b.call(b.ident("cap"), &[b.ident("s")]));
        assert_eq!(y.mode, OperandMode::Value);
        assert!(checker.diagnostics().is_empty());

        checker.expr(b.call(b.ident("cap"), &[b.string("hello")]));
        checker.expr(b.call(b.ident("len"), &[b.ident("n")]));
        checker.expr(b.call(b.ident("len"), &[]));
        assert_eq!(
            checker.finish().diagnostics.kinds(),
            vec![
                ErrorKind::InvalidBuiltinArgument,
                ErrorKind::InvalidBuiltinArgument,
                ErrorKind::WrongBuiltinArgumentCount,
            ]
        );
    }

    #[test]
    fn append_checks_elements() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        let x = checker.expr(b.call(b.ident("append"), &[b.ident("s"), b.string("a"), b.string("b")]));
        assert_eq!(x.ty, Some(fx.strings));
        checker.expr(b.call_spread(b.ident("append"), &[b.ident("s"), b.ident("s")]));
        checker.expr(b.call_spread(b.ident("append"), &[b.ident("bs"), b.string("tail")]));
        checker.expr(b.call(b.ident("append"), &[b.ident("s")]));
        assert!(checker.diagnostics().is_empty());

        checker.expr(b.call(b.ident("append"), &[b.ident("s"), b.int(1)]));
        checker.expr(b.call(b.ident("append"), &[b.ident("n"), b.int(1)]));
        checker.expr(b.call_spread(b.ident("len"), &[b.ident("s")]));
        assert_eq!(
            checker.finish().diagnostics.kinds(),
            vec![
                ErrorKind::ArgumentTypeMismatch,
                ErrorKind::InvalidBuiltinArgument,
                ErrorKind::InvalidBuiltinArgument,
            ]
        );
    }

    #[test]
    fn copy_new_and_statements() {
        let fx = Fixture::new();
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut checker = fx.checker();

        let n = checker.expr(b.call(b.ident("copy"), &[b.ident("bs"), b.string("abc")]));
        assert_eq!(n.ty, Some(BasicKind::Int.type_id()));
        let p = checker.expr(b.call(b.ident("new"), &[b.ident("Point")]));
        assert_eq!(p.ty, Some(fx.point_ptr));
        assert_eq!(checker.raw_expr(b.call(b.ident("println"), &[b.ident("n"), b.string("x")])).mode, OperandMode::NoValue);
        assert_eq!(checker.raw_expr(b.call(b.ident("panic"), &[b.string("boom")])).mode, OperandMode::NoValue);
        assert!(checker.diagnostics().is_empty());

        checker.expr(b.call(b.ident("copy"), &[b.ident("s"), b.ident("bs")]));
        checker.expr(b.call(b.ident("new"), &[b.ident("n")]));
        checker.raw_expr(b.call(b.ident("print"), &[b.ident("nil")]));
        assert_eq!(
            checker.finish().diagnostics.kinds(),
            vec![
                ErrorKind::InvalidBuiltinArgument,
                ErrorKind::NotAType,
                ErrorKind::InvalidBuiltinArgument,
            ]
        );
    }
}
