//! Predeclared basic types.
//!
//! The registry creates one `Type::Basic` per [`BasicKind`] before anything
//! else, in discriminant order, so `TypeId::global(kind as u32)` is always the
//! id of that basic type.

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ids::TypeId;

/// Kinds of predeclared basic types, including the untyped constant kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum BasicKind {
    /// The type of operands whose checking failed.
    Invalid = 0,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    String,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedString,
    UntypedNil,
}

bitflags! {
    /// Properties of a basic type, used by assignability and conversion rules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BasicInfo: u8 {
        const BOOLEAN = 1 << 0;
        const INTEGER = 1 << 1;
        const UNSIGNED = 1 << 2;
        const FLOAT = 1 << 3;
        const STRING = 1 << 4;
        const UNTYPED = 1 << 5;

        const NUMERIC = Self::INTEGER.bits() | Self::FLOAT.bits();
        const CONST_TYPE = Self::BOOLEAN.bits() | Self::NUMERIC.bits() | Self::STRING.bits();
    }
}

impl BasicKind {
    /// Every kind, in registration order.
    pub const ALL: [BasicKind; 22] = [
        BasicKind::Invalid,
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::String,
        BasicKind::UntypedBool,
        BasicKind::UntypedInt,
        BasicKind::UntypedRune,
        BasicKind::UntypedFloat,
        BasicKind::UntypedString,
        BasicKind::UntypedNil,
    ];

    /// Id of this basic type in every registry.
    #[inline]
    pub const fn type_id(self) -> TypeId {
        TypeId::global(self as u32)
    }

    /// Source spelling of the kind.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Invalid => "invalid type",
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::String => "string",
            BasicKind::UntypedBool => "untyped bool",
            BasicKind::UntypedInt => "untyped int",
            BasicKind::UntypedRune => "untyped rune",
            BasicKind::UntypedFloat => "untyped float",
            BasicKind::UntypedString => "untyped string",
            BasicKind::UntypedNil => "untyped nil",
        }
    }

    pub fn info(self) -> BasicInfo {
        use BasicKind::*;
        match self {
            Invalid => BasicInfo::empty(),
            Bool => BasicInfo::BOOLEAN,
            Int | Int8 | Int16 | Int32 | Int64 => BasicInfo::INTEGER,
            Uint | Uint8 | Uint16 | Uint32 | Uint64 | Uintptr => {
                BasicInfo::INTEGER | BasicInfo::UNSIGNED
            }
            Float32 | Float64 => BasicInfo::FLOAT,
            String => BasicInfo::STRING,
            UntypedBool => BasicInfo::BOOLEAN | BasicInfo::UNTYPED,
            UntypedInt | UntypedRune => BasicInfo::INTEGER | BasicInfo::UNTYPED,
            UntypedFloat => BasicInfo::FLOAT | BasicInfo::UNTYPED,
            UntypedString => BasicInfo::STRING | BasicInfo::UNTYPED,
            UntypedNil => BasicInfo::UNTYPED,
        }
    }

    #[inline]
    pub fn is_untyped(self) -> bool {
        self.info().contains(BasicInfo::UNTYPED)
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        self.info().contains(BasicInfo::INTEGER)
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        self.info().intersects(BasicInfo::NUMERIC)
    }

    #[inline]
    pub fn is_string(self) -> bool {
        self.info().contains(BasicInfo::STRING)
    }

    #[inline]
    pub fn is_boolean(self) -> bool {
        self.info().contains(BasicInfo::BOOLEAN)
    }

    /// The typed kind an untyped constant of this kind defaults to.
    ///
    /// Typed kinds, and untyped nil, are returned unchanged.
    pub fn default_kind(self) -> BasicKind {
        match self {
            BasicKind::UntypedBool => BasicKind::Bool,
            BasicKind::UntypedInt => BasicKind::Int,
            BasicKind::UntypedRune => BasicKind::Int32,
            BasicKind::UntypedFloat => BasicKind::Float64,
            BasicKind::UntypedString => BasicKind::String,
            other => other,
        }
    }

    /// Inclusive value range of a typed integer kind on a 64-bit target.
    pub fn integer_range(self) -> Option<(i128, i128)> {
        let range = match self {
            BasicKind::Int8 => (i8::MIN as i128, i8::MAX as i128),
            BasicKind::Int16 => (i16::MIN as i128, i16::MAX as i128),
            BasicKind::Int32 => (i32::MIN as i128, i32::MAX as i128),
            BasicKind::Int | BasicKind::Int64 => (i64::MIN as i128, i64::MAX as i128),
            BasicKind::Uint8 => (0, u8::MAX as i128),
            BasicKind::Uint16 => (0, u16::MAX as i128),
            BasicKind::Uint32 => (0, u32::MAX as i128),
            BasicKind::Uint | BasicKind::Uint64 | BasicKind::Uintptr => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }
}
