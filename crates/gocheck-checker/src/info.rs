//! Recorded bindings.
//!
//! While checking, the checker records what each identifier resolved to and
//! how each selector was resolved, keyed by the span of the node. Later
//! stages read these tables instead of resolving names again.

use gocheck_core::{ObjectId, Span, TypeId};
use rustc_hash::FxHashMap;

use crate::operand::OperandMode;

/// How a selector expression `x.f` was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// `x.f` is a struct field.
    FieldVal,
    /// `x.m` is a method bound to the value `x`.
    MethodVal,
    /// `T.m` is a method expression taking the receiver as first argument.
    MethodExpr,
}

/// The resolution of a non-package selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: SelectionKind,
    /// Type of the base expression.
    pub recv: TypeId,
    /// The selected field or method.
    pub object: ObjectId,
    /// Field indices walked through embedded fields, ending at the member.
    pub path: Vec<usize>,
    /// A pointer was dereferenced on the way to the member.
    pub indirect: bool,
}

impl Selection {
    /// Number of embedded fields traversed before reaching the member.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Mode and type recorded for an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAndValue {
    pub mode: OperandMode,
    pub ty: Option<TypeId>,
}

/// Bindings produced by a checker run.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    uses: FxHashMap<Span, ObjectId>,
    selections: FxHashMap<Span, Selection>,
    types: FxHashMap<Span, TypeAndValue>,
}

impl TypeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_use(&mut self, ident: Span, obj: ObjectId) {
        self.uses.insert(ident, obj);
    }

    pub(crate) fn record_selection(&mut self, selector: Span, selection: Selection) {
        self.selections.insert(selector, selection);
    }

    pub(crate) fn record_type(&mut self, expr: Span, tv: TypeAndValue) {
        self.types.insert(expr, tv);
    }

    /// Object an identifier at `ident` referred to.
    pub fn use_at(&self, ident: Span) -> Option<ObjectId> {
        self.uses.get(&ident).copied()
    }

    /// Selection recorded for the selector expression at `selector`.
    pub fn selection_at(&self, selector: Span) -> Option<&Selection> {
        self.selections.get(&selector)
    }

    pub fn type_at(&self, expr: Span) -> Option<&TypeAndValue> {
        self.types.get(&expr)
    }

    pub fn uses(&self) -> impl Iterator<Item = (&Span, &ObjectId)> {
        self.uses.iter()
    }

    pub fn selections(&self) -> impl Iterator<Item = (&Span, &Selection)> {
        self.selections.iter()
    }

    pub fn use_count(&self) -> usize {
        self.uses.len()
    }

    pub fn selection_count(&self) -> usize {
        self.selections.len()
    }
}
