//! Error types.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ErrorKind          - classification of user-facing type-checking diagnostics
//! RegistrationError  - building the symbol registry went wrong (Result-based)
//! InternalError      - an engine invariant was broken (defect, never user-facing)
//! ```
//!
//! Type-checking problems in user code are never returned as `Err`: they are
//! reported as [`Diagnostic`](crate::Diagnostic)s and the checker carries on
//! with an invalid operand.

use std::fmt;

use num_enum::IntoPrimitive;
use thiserror::Error;

use crate::span::Span;

// ============================================================================
// Diagnostic kinds
// ============================================================================

/// Classification of a type-checking diagnostic.
///
/// The numeric value is stable and rendered as `E0nn` in diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive)]
#[repr(u16)]
pub enum ErrorKind {
    // Calls
    /// The callee is neither a function, a type, nor a builtin.
    NotCallable = 1,
    /// `f(xs...)` where `f` is not variadic.
    SpreadOnNonVariadic = 2,
    TooFewArguments = 3,
    TooManyArguments = 4,
    /// A spread argument is not in the variadic parameter's slot.
    SpreadPositionMismatch = 5,
    /// A spread argument is not a slice assignable to the variadic parameter.
    SpreadTypeMismatch = 6,
    ArgumentTypeMismatch = 7,

    // Selectors
    UndeclaredPackageMember = 8,
    UnexportedPackageMember = 9,
    NoSuchMember = 10,
    /// Several members with the selected name at the shallowest depth.
    AmbiguousSelector = 11,
    /// A method expression selected something that is not a method.
    NoSuchMethod = 12,
    /// A pointer-receiver method selected through a non-addressable value.
    NotInMethodSet = 13,

    // Expression evaluation
    UndeclaredName = 20,
    NotAnExpression = 21,
    NoValueUsedAsValue = 22,
    InvalidIndirection = 23,
    CannotTakeAddress = 24,
    /// A package name used outside a selector.
    PackageNotInSelector = 25,
    BlankIdentifierUse = 26,
    /// A value where a type is required.
    NotAType = 27,

    // Conversions
    InvalidConversion = 30,
    MissingConversionArgument = 31,
    TooManyConversionArguments = 32,

    // Builtins
    InvalidBuiltinArgument = 40,
    WrongBuiltinArgumentCount = 41,
}

impl ErrorKind {
    /// Stable numeric code.
    pub fn code(self) -> u16 {
        self.into()
    }

    /// Short kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotCallable => "not-callable",
            ErrorKind::SpreadOnNonVariadic => "spread-on-non-variadic",
            ErrorKind::TooFewArguments => "too-few-arguments",
            ErrorKind::TooManyArguments => "too-many-arguments",
            ErrorKind::SpreadPositionMismatch => "spread-position-mismatch",
            ErrorKind::SpreadTypeMismatch => "spread-type-mismatch",
            ErrorKind::ArgumentTypeMismatch => "argument-type-mismatch",
            ErrorKind::UndeclaredPackageMember => "undeclared-package-member",
            ErrorKind::UnexportedPackageMember => "unexported-package-member",
            ErrorKind::NoSuchMember => "no-such-member",
            ErrorKind::AmbiguousSelector => "ambiguous-selector",
            ErrorKind::NoSuchMethod => "no-such-method",
            ErrorKind::NotInMethodSet => "not-in-method-set",
            ErrorKind::UndeclaredName => "undeclared-name",
            ErrorKind::NotAnExpression => "not-an-expression",
            ErrorKind::NoValueUsedAsValue => "no-value-used-as-value",
            ErrorKind::InvalidIndirection => "invalid-indirection",
            ErrorKind::CannotTakeAddress => "cannot-take-address",
            ErrorKind::PackageNotInSelector => "package-not-in-selector",
            ErrorKind::BlankIdentifierUse => "blank-identifier-use",
            ErrorKind::NotAType => "not-a-type",
            ErrorKind::InvalidConversion => "invalid-conversion",
            ErrorKind::MissingConversionArgument => "missing-conversion-argument",
            ErrorKind::TooManyConversionArguments => "too-many-conversion-arguments",
            ErrorKind::InvalidBuiltinArgument => "invalid-builtin-argument",
            ErrorKind::WrongBuiltinArgumentCount => "wrong-builtin-argument-count",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:03}", self.code())
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while declaring entities in the symbol registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A name was declared twice in the same scope.
    #[error("at {span}: {name} redeclared in this block")]
    Duplicate { name: String, span: Span },

    /// Two packages registered with the same import path.
    #[error("package path {path} already registered")]
    DuplicatePackage { path: String },

    /// A scope id that the registry never handed out.
    #[error("unknown scope #{0}")]
    UnknownScope(usize),

    /// A variadic signature whose last parameter is not a slice.
    #[error("variadic parameter must have a slice type, found {found}")]
    VariadicNotSlice { found: String },

    /// A variadic signature without parameters.
    #[error("variadic signature has no parameters")]
    VariadicWithoutParams,

    /// Methods can only be declared on named, non-pointer, non-interface types.
    #[error("at {span}: invalid receiver type {receiver}")]
    InvalidReceiver { receiver: String, span: Span },

    /// The underlying type of a named type must not itself be named.
    #[error("underlying type of {name} must not be a named type")]
    NamedUnderlying { name: String },

    /// An operation that needs a declared type was given another type.
    #[error("{found} is not a named type")]
    NotNamed { found: String },

    /// Embedded fields must be a type name `T` or a pointer `*T` to one.
    #[error("embedded field type {found} must be a type name or a pointer to one")]
    InvalidEmbeddedField { found: String },
}

// ============================================================================
// Internal Errors
// ============================================================================

/// A broken engine invariant. Reaching one of these is a bug in the checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    /// An object kind reached a branch that excludes it.
    #[error("at {span}: unexpected {kind} object {name}")]
    UnexpectedObject {
        name: String,
        kind: &'static str,
        span: Span,
    },

    /// A method object whose type is not a signature.
    #[error("at {span}: method {name} has no signature")]
    MissingSignature { name: String, span: Span },
}

impl InternalError {
    pub fn span(&self) -> Span {
        match self {
            InternalError::UnexpectedObject { span, .. } | InternalError::MissingSignature { span, .. } => *span,
        }
    }
}
