//! Deterministic identity for named types.
//!
//! Two named types are identical exactly when they were declared with the same
//! name in the same package. [`TypeHash`] folds that pair into a 64-bit value
//! with XXHash64, so identity checks reduce to an integer comparison and the
//! same declaration hashes the same way in every registry.
//!
//! # Examples
//!
//! ```
//! use gocheck_core::TypeHash;
//!
//! let a = TypeHash::from_qualified("example.com/geo", "Point");
//! let b = TypeHash::from_qualified("example.com/geo", "Point");
//! let c = TypeHash::from_qualified("example.com/draw", "Point");
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator between the package path and the type name.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for named type hashes.
    pub const NAMED: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for predeclared (universe) type hashes.
    pub const UNIVERSE: u64 = 0x1a095090689d4647;
}

/// A deterministic 64-bit hash identifying a named type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Hash of a predeclared type such as `error`.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::UNIVERSE ^ xxh64(name.as_bytes(), 0))
    }

    /// Hash of a type declared as `name` in the package with import path `pkg_path`.
    #[inline]
    pub fn from_qualified(pkg_path: &str, name: &str) -> Self {
        let path = xxh64(pkg_path.as_bytes(), 0);
        let name = xxh64(name.as_bytes(), 0);
        TypeHash(
            hash_constants::NAMED
                ^ path
                    .wrapping_mul(hash_constants::SEP)
                    .wrapping_add(name),
        )
    }

    /// Check if this is the empty hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
