//! Index identifiers for registry-owned entities.
//!
//! Objects, scopes and packages are stored in flat vectors inside the symbol
//! registry and referred to by index. Types additionally live in two layers:
//! the shared, frozen registry and a checker-private overlay holding types
//! synthesized while checking. The top bit of a [`TypeId`] selects the layer.

use std::fmt;

const LOCAL_BIT: u32 = 1 << 31;

/// Identifies a type in either the shared registry or a checker overlay.
///
/// # Example
///
/// ```
/// use gocheck_core::TypeId;
///
/// let shared = TypeId::global(4);
/// let synthesized = TypeId::local(4);
/// assert!(!shared.is_local());
/// assert!(synthesized.is_local());
/// assert_eq!(shared.index(), synthesized.index());
/// assert_ne!(shared, synthesized);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// A type stored in the shared registry.
    #[inline]
    pub const fn global(index: u32) -> Self {
        debug_assert!(index & LOCAL_BIT == 0);
        Self(index)
    }

    /// A type stored in a checker's private overlay.
    #[inline]
    pub const fn local(index: u32) -> Self {
        debug_assert!(index & LOCAL_BIT == 0);
        Self(index | LOCAL_BIT)
    }

    /// Whether this type was synthesized by a checker.
    #[inline]
    pub const fn is_local(self) -> bool {
        self.0 & LOCAL_BIT != 0
    }

    /// Position inside the owning layer.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 & !LOCAL_BIT) as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_local() {
            write!(f, "TypeId(local {})", self.index())
        } else {
            write!(f, "TypeId({})", self.index())
        }
    }
}

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Create an identifier from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Position inside the registry's storage.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index as u32)
            }
        }
    };
}

index_id!(
    /// Identifies a declared object (constant, type name, variable, function, package name).
    ObjectId
);
index_id!(
    /// Identifies a lexical scope.
    ScopeId
);
index_id!(
    /// Identifies a package.
    PackageId
);
