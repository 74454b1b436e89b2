//! Checker state shared by every expression form.
//!
//! A [`Checker`] owns everything that changes while checking: the current
//! scope, the local type overlay, recorded bindings and the diagnostics. The
//! declarations it resolves names against are borrowed from a finished
//! [`SymbolRegistry`].

use gocheck_core::{
    Diagnostics, ErrorKind, InternalError, ObjectId, PackageId, ScopeId, Span, TypeId, type_string,
};
use gocheck_registry::SymbolRegistry;
use tracing::debug;

use crate::info::{Selection, TypeAndValue, TypeInfo};
use crate::operand::Operand;
use crate::type_context::TypeContext;

/// Options for a checker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckerConfig {
    /// Record the mode and type of every checked expression.
    pub record_types: bool,
    /// Keep at most this many diagnostics. Further ones are only counted.
    pub max_errors: Option<usize>,
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_types(mut self, record: bool) -> Self {
        self.record_types = record;
        self
    }

    pub fn max_errors(mut self, limit: usize) -> Self {
        self.max_errors = Some(limit);
        self
    }
}

/// Everything a checker run produced.
#[derive(Debug, Clone, Default)]
pub struct CheckOutput {
    pub info: TypeInfo,
    pub diagnostics: Diagnostics,
}

impl CheckOutput {
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Type checker for expressions of one package.
///
/// Checking is best-effort: problems are reported to the diagnostics sink
/// and the offending expression evaluates to an invalid operand, so a single
/// run reports as many independent errors as possible.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use gocheck_ast::AstBuilder;
/// use gocheck_checker::{Checker, OperandMode};
/// use gocheck_core::BasicKind;
/// use gocheck_registry::SymbolRegistry;
///
/// let mut registry = SymbolRegistry::new();
/// let pkg = registry.new_package("example.com/main", "main").unwrap();
/// let scope = registry.package_scope(pkg);
/// let int = BasicKind::Int.type_id();
/// let sig = registry.func(&[int], &[int], false).unwrap();
/// registry.declare_func(scope, "double", sig).unwrap();
///
/// let arena = Bump::new();
/// let b = AstBuilder::new(&arena);
/// let mut checker = Checker::new(&registry, pkg);
/// let x = checker.expr(b.call(b.ident("double"), &[b.int(21)]));
/// assert_eq!(x.mode, OperandMode::Value);
/// assert_eq!(x.ty, Some(int));
/// assert!(checker.finish().is_success());
/// ```
#[derive(Debug)]
pub struct Checker<'r> {
    types: TypeContext<'r>,
    pkg: PackageId,
    scope: ScopeId,
    config: CheckerConfig,
    info: TypeInfo,
    diagnostics: Diagnostics,
}

impl<'r> Checker<'r> {
    /// A checker for `pkg`, starting in its package scope.
    pub fn new(registry: &'r SymbolRegistry, pkg: PackageId) -> Self {
        Self::with_config(registry, pkg, CheckerConfig::default())
    }

    pub fn with_config(registry: &'r SymbolRegistry, pkg: PackageId, config: CheckerConfig) -> Self {
        Self {
            types: TypeContext::new(registry),
            pkg,
            scope: registry.package_scope(pkg),
            config,
            info: TypeInfo::new(),
            diagnostics: Diagnostics::with_limit(config.max_errors),
        }
    }

    /// Continue checking in `scope`, e.g. a function body's scope.
    pub fn set_scope(&mut self, scope: ScopeId) {
        self.scope = scope;
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn package(&self) -> PackageId {
        self.pkg
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r SymbolRegistry {
        self.types.registry()
    }

    /// All types visible to this checker, including synthesized ones.
    pub fn types(&self) -> &TypeContext<'r> {
        &self.types
    }

    pub(crate) fn types_mut(&mut self) -> &mut TypeContext<'r> {
        &mut self.types
    }

    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Stop checking and hand out what was recorded.
    pub fn finish(self) -> CheckOutput {
        debug!(
            errors = self.diagnostics.error_count(),
            uses = self.info.use_count(),
            selections = self.info.selection_count(),
            "checker finished"
        );
        CheckOutput {
            info: self.info,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    pub(crate) fn error(&mut self, span: Span, kind: ErrorKind, message: impl Into<String>) {
        let message = message.into();
        debug!(%span, kind = kind.as_str(), %message, "diagnostic");
        self.diagnostics.report(span, kind, message);
    }

    /// An engine invariant was broken. Never shown to the user.
    pub(crate) fn internal(&mut self, err: InternalError) {
        tracing::error!(error = %err, "internal checker error");
        debug_assert!(false, "internal checker error: {err}");
    }

    /// Render `ty` relative to the package being checked.
    pub(crate) fn type_string(&self, ty: TypeId) -> String {
        type_string(&self.types, ty, Some(self.pkg))
    }

    pub(crate) fn describe(&self, x: &Operand<'_>) -> String {
        x.describe(&self.types, Some(self.pkg))
    }

    // =========================================================================
    // Recording
    // =========================================================================

    pub(crate) fn record_use(&mut self, ident: Span, obj: ObjectId) {
        self.info.record_use(ident, obj);
    }

    pub(crate) fn record_selection(&mut self, selector: Span, selection: Selection) {
        self.info.record_selection(selector, selection);
    }

    pub(crate) fn record_type(&mut self, x: &Operand<'_>) {
        if self.config.record_types {
            self.info.record_type(
                x.span(),
                TypeAndValue {
                    mode: x.mode.clone(),
                    ty: x.ty,
                },
            );
        }
    }
}
