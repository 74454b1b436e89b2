//! Diagnostic collection.
//!
//! The checker never aborts on a problem in the checked program. Each problem
//! becomes a [`Diagnostic`] pushed into a [`Diagnostics`] sink, and checking
//! continues with an invalid operand.
//!
//! # Examples
//!
//! ```
//! use gocheck_core::{Diagnostics, ErrorKind, Span};
//!
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.report(Span::new(4, 9, 3), ErrorKind::NotCallable, "invalid operation: cannot call non-function x");
//!
//! assert!(diagnostics.has_errors());
//! assert_eq!(
//!     diagnostics.to_string(),
//!     "4:9: error[E001]: invalid operation: cannot call non-function x\n"
//! );
//! ```

use std::fmt;

use crate::error::ErrorKind;
use crate::span::Span;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single message about the checked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}[{}]: {}", self.span, self.severity, self.kind, self.message)
    }
}

/// An append-only collection of diagnostics.
///
/// With a limit set, diagnostics past the limit are counted but not stored.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    limit: Option<usize>,
    dropped: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection storing at most `limit` diagnostics.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record an error.
    pub fn report(&mut self, span: Span, kind: ErrorKind, message: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Error,
            kind,
            span,
            message: message.into(),
        });
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.limit.is_some_and(|limit| self.items.len() >= limit) {
            self.dropped += 1;
            return;
        }
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors reported, including those dropped past the limit.
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.severity == Severity::Error).count() + self.dropped
    }

    /// Number of diagnostics not stored because of the limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.dropped == 0
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Stored diagnostics of one kind.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    /// Kinds of the stored diagnostics, in report order.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.items.iter().map(|d| d.kind).collect()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.items {
            writeln!(f, "{diagnostic}")?;
        }
        if self.dropped > 0 {
            writeln!(f, "... and {} more errors", self.dropped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_counts_dropped_diagnostics() {
        let mut diags = Diagnostics::with_limit(Some(1));
        diags.report(Span::new(1, 1, 1), ErrorKind::TooFewArguments, "not enough arguments");
        diags.report(Span::new(2, 1, 1), ErrorKind::TooManyArguments, "too many arguments");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.error_count(), 2);
        assert_eq!(diags.dropped(), 1);
        assert!(diags.to_string().ends_with("... and 1 more errors\n"));
    }

    #[test]
    fn filter_by_kind() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        diags.report(Span::new(1, 1, 1), ErrorKind::NoSuchMember, "a");
        diags.report(Span::new(1, 5, 1), ErrorKind::NotCallable, "b");
        diags.report(Span::new(2, 1, 1), ErrorKind::NoSuchMember, "c");
        assert_eq!(diags.of_kind(ErrorKind::NoSuchMember).count(), 2);
        assert_eq!(
            diags.kinds(),
            vec![ErrorKind::NoSuchMember, ErrorKind::NotCallable, ErrorKind::NoSuchMember]
        );
    }
}
