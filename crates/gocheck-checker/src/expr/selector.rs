//! Selector expressions `base.name`.
//!
//! A selector is either a qualified identifier `pkg.Name`, handled entirely
//! here so operands need no "package" mode, or a member selection on a value
//! or type. Member selections go through [`lookup_field_or_method`] and are
//! classified as field values, method values or method expressions.

use gocheck_ast::{Expr, IdentExpr, SelectorExpr};
use gocheck_core::predicates::ptr_recv;
use gocheck_core::{
    ErrorKind, InternalError, ObjectKind, PackageId, Param, Signature, Symbols, is_exported,
};

use crate::checker::Checker;
use crate::info::{Selection, SelectionKind};
use crate::lookup::{LookupResult, lookup_field_or_method};
use crate::operand::Operand;

/// Check `base.name`.
#[tracing::instrument(level = "trace", skip_all, fields(sel = sel.sel.name))]
#[cfg_attr(feature = "profiling", profiling::function)]
pub(super) fn check_selector<'ast>(checker: &mut Checker<'_>, sel: &'ast SelectorExpr<'ast>) -> Operand<'ast> {
    let e = Expr::Selector(sel);
    let name = sel.sel.name;

    if let Expr::Ident(ident) = sel.base
        && let Some((_, obj)) = checker.registry().lookup_parent(checker.scope(), ident.name)
        && let ObjectKind::Package { package } = checker.registry().object(obj).kind
    {
        checker.record_use(ident.span, obj);
        return package_member(checker, sel, ident, package);
    }

    let x = checker.expr_or_type(sel.base);
    if x.is_invalid() {
        return Operand::invalid(e);
    }
    let base_ty = x.type_or_invalid();

    let member = match lookup_field_or_method(checker.types(), base_ty, Some(checker.package()), name) {
        LookupResult::Found(member) => member,
        LookupResult::Ambiguous { .. } => {
            let msg = format!("ambiguous selector {}", e);
            checker.error(sel.span, ErrorKind::AmbiguousSelector, msg);
            return Operand::invalid(e);
        }
        LookupResult::NotFound => {
            let msg = format!(
                "{} undefined ({} has no field or method {})",
                e,
                checker.describe(&x),
                name
            );
            checker.error(sel.span, ErrorKind::NoSuchMember, msg);
            return Operand::invalid(e);
        }
    };

    let registry = checker.registry();
    let obj = registry.object(member.object);
    let is_method = matches!(obj.kind, ObjectKind::Function { .. });

    // Recorded before any of the checks below so tooling sees what was meant.
    checker.record_use(sel.sel.span, member.object);
    checker.record_selection(
        sel.span,
        Selection {
            kind: match (x.is_type(), is_method) {
                (true, true) => SelectionKind::MethodExpr,
                (false, true) => SelectionKind::MethodVal,
                (_, false) => SelectionKind::FieldVal,
            },
            recv: base_ty,
            object: member.object,
            path: member.path.clone(),
            indirect: member.indirect,
        },
    );

    if x.is_type() {
        // Method expression T.m: a function taking the receiver first.
        let ObjectKind::Function { ty: sig_ty, .. } = obj.kind else {
            let msg = format!("{} undefined ({} has no method {})", e, checker.describe(&x), name);
            checker.error(sel.span, ErrorKind::NoSuchMethod, msg);
            return Operand::invalid(e);
        };
        if !member.indirect && ptr_recv(registry, member.object) {
            let msg = format!(
                "invalid method expression {} (needs pointer receiver (*{}).{}): {} is not in method set of {}",
                e,
                checker.type_string(base_ty),
                name,
                name,
                checker.type_string(base_ty)
            );
            checker.error(sel.span, ErrorKind::NotInMethodSet, msg);
            return Operand::invalid(e);
        }
        let Some(sig) = registry.ty(sig_ty).as_signature() else {
            checker.internal(InternalError::MissingSignature {
                name: name.to_string(),
                span: sel.span,
            });
            return Operand::invalid(e);
        };

        let mut params = Vec::with_capacity(sig.params.len() + 1);
        params.push(Param::unnamed(base_ty));
        params.extend(sig.params.iter().cloned());
        let ty = checker
            .types_mut()
            .signature(Signature::new(params, sig.results.clone(), sig.variadic));
        return Operand::value(e, ty);
    }

    match &obj.kind {
        ObjectKind::Variable { ty, .. } => Operand::variable(e, *ty),
        ObjectKind::Function { ty, .. } => {
            // A pointer-receiver method needs a pointer or an addressable value.
            if !member.indirect && !x.is_variable() && ptr_recv(registry, member.object) {
                let msg = format!(
                    "cannot call pointer method {} on {}: {} is not in method set of {}",
                    name,
                    checker.describe(&x),
                    name,
                    checker.type_string(base_ty)
                );
                checker.error(sel.span, ErrorKind::NotInMethodSet, msg);
                return Operand::invalid(e);
            }
            Operand::value(e, *ty)
        }
        ObjectKind::Constant { .. } | ObjectKind::TypeName { .. } | ObjectKind::Package { .. } => {
            checker.internal(InternalError::UnexpectedObject {
                name: obj.name.clone(),
                kind: obj.kind_name(),
                span: sel.span,
            });
            Operand::invalid(e)
        }
    }
}

/// `pkg.Name` where `pkg` names an imported package.
fn package_member<'ast>(
    checker: &mut Checker<'_>,
    sel: &'ast SelectorExpr<'ast>,
    pkg_ident: &IdentExpr<'_>,
    package: PackageId,
) -> Operand<'ast> {
    let e = Expr::Selector(sel);
    let name = sel.sel.name;

    // Unexported names are never reachable, declared or not.
    if !is_exported(name) {
        let msg = format!("{} not exported by package {}", name, pkg_ident.name);
        checker.error(sel.span, ErrorKind::UnexportedPackageMember, msg);
        return Operand::invalid(e);
    }

    let registry = checker.registry();
    let Some(id) = registry.lookup(registry.package(package).scope, name) else {
        let msg = format!("{} not declared by package {}", name, pkg_ident.name);
        checker.error(sel.span, ErrorKind::UndeclaredPackageMember, msg);
        return Operand::invalid(e);
    };
    checker.record_use(sel.sel.span, id);

    let obj = registry.object(id);
    match &obj.kind {
        ObjectKind::Constant { ty, value } => Operand::constant(e, *ty, value.clone()),
        ObjectKind::TypeName { ty } => Operand::type_expr(e, *ty),
        ObjectKind::Variable { ty, .. } => Operand::variable(e, *ty),
        ObjectKind::Function { ty, .. } => Operand::value(e, *ty),
        ObjectKind::Package { .. } => {
            checker.internal(InternalError::UnexpectedObject {
                name: obj.name.clone(),
                kind: obj.kind_name(),
                span: sel.span,
            });
            Operand::invalid(e)
        }
    }
}
