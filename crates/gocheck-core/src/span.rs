//! Source location tracking for diagnostics and recorded bindings.
//!
//! Provides [`Span`], the position attached to every expression node. Spans
//! are also the keys under which the checker records resolved identifiers and
//! selections, so two distinct nodes must never share a span.

use std::fmt;

/// A span of source code, represented by its starting position and length.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a new span from a line, column, and length.
    #[inline]
    pub const fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub const fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    /// Whether this span has no extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Column one past the last byte covered by this span.
    #[inline]
    pub fn end_col(&self) -> u32 {
        self.col + self.len
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// Spans on different lines keep the start of the earlier one and only
    /// approximate the extent.
    pub fn to(self, other: Span) -> Span {
        let (first, second) = if other < self { (other, self) } else { (self, other) };
        if first.line == second.line {
            let end = first.end_col().max(second.end_col());
            Span::new(first.line, first.col, end - first.col)
        } else {
            Span::new(first.line, first.col, first.len + second.len)
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}+{}", self.line, self.col, self.len)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
