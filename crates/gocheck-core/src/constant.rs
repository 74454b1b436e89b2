//! Compile-time constant values.
//!
//! Arithmetic on constants belongs to a separate folding stage; this module
//! only carries values through the checker and answers whether a value fits a
//! given basic type.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::basic::BasicKind;

/// The value of a constant operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Bool(bool),
    /// Integer and rune constants. Wide enough for every 64-bit kind.
    Int(i128),
    Float(OrderedFloat<f64>),
    String(String),
    /// The predeclared `nil`.
    Nil,
}

impl ConstValue {
    /// Convenience constructor for float constants.
    pub fn float(value: f64) -> Self {
        ConstValue::Float(OrderedFloat(value))
    }

    /// Convert this value to one of type `kind`, if it is representable there.
    ///
    /// Integers fit integer kinds within range and float kinds always; floats
    /// fit integer kinds only when integral and in range. Untyped target kinds
    /// accept any value of their own class.
    pub fn representable_as(&self, kind: BasicKind) -> Option<ConstValue> {
        match self {
            ConstValue::Bool(_) if kind.is_boolean() => Some(self.clone()),
            ConstValue::String(_) if kind.is_string() => Some(self.clone()),
            ConstValue::Int(v) => {
                if kind.is_integer() {
                    match kind.integer_range() {
                        Some((lo, hi)) if *v < lo || *v > hi => None,
                        _ => Some(self.clone()),
                    }
                } else if kind.is_numeric() {
                    Some(ConstValue::float(*v as f64))
                } else {
                    None
                }
            }
            ConstValue::Float(v) => {
                if kind.is_integer() {
                    let f = v.into_inner();
                    if f.fract() != 0.0 || !f.is_finite() {
                        return None;
                    }
                    ConstValue::Int(f as i128).representable_as(kind)
                } else if kind.is_numeric() {
                    if kind == BasicKind::Float32 && v.into_inner().abs() > f32::MAX as f64 {
                        return None;
                    }
                    Some(self.clone())
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(b) => write!(f, "{b}"),
            ConstValue::Int(i) => write!(f, "{i}"),
            ConstValue::Float(v) => write!(f, "{}", v.into_inner()),
            ConstValue::String(s) => write!(f, "{s:?}"),
            ConstValue::Nil => f.write_str("nil"),
        }
    }
}
