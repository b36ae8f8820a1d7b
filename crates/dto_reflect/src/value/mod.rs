//! The loosely-typed value model that DTOs are hydrated from.
//!
//! Input arrives as a [`Mapping`] of [`Value`]s, typically decoded by a serde
//! codec. Coercion pattern-matches on the [`Value`] variants, and typed DTO
//! fields convert through [`FromValue`] / [`ToValue`].

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::dto::{Dto, DynDto};

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod mapping;
mod serde;

pub use convert::{FromValue, ToValue};
pub use mapping::Mapping;

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value.
///
/// `Object` holds an already constructed DTO. Coercion never re-wraps it.
///
/// `UInt` only carries integers above `i64::MAX`; anything smaller is `Int`.
///
/// # Examples
///
/// ```
/// use dto_reflect::{Value, mapping};
///
/// let raw = mapping! { "id" => 7, "name" => "Joe" };
/// assert_eq!(raw.get("id"), Some(&Value::Int(7)));
/// assert_eq!(raw.get("name").and_then(Value::as_str), Some("Joe"));
/// ```
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Seq(Vec<Value>),
    Map(Mapping),
    Object(Box<dyn DynDto>),
}

impl Value {
    /// A short name of the variant, used in conversion errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns any integer as `u64`, if it is not negative.
    #[inline]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Int(v) if *v >= 0 => Some(*v as u64),
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `f64`, widening integers.
    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            Value::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&dyn DynDto> {
        match self {
            Value::Object(v) => Some(&**v),
            _ => None,
        }
    }

    /// Returns the held object if it is a `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dto_reflect::{Dto, Value, derive::Dto};
    ///
    /// #[derive(Dto, Clone, Default)]
    /// struct Point {
    ///     pub x: i64,
    /// }
    ///
    /// let value = Value::Object(Box::new(Point { x: 3 }));
    /// assert_eq!(value.as_dto::<Point>().map(|p| p.x), Some(3));
    /// ```
    #[inline]
    pub fn as_dto<T: Dto>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref::<T>()
    }

    /// Takes the held object out if it is a `T`.
    pub fn into_dto<T: Dto>(self) -> Result<T, Self> {
        match self {
            Value::Object(obj) => match obj.downcast::<T>() {
                Ok(dto) => Ok(*dto),
                Err(obj) => Err(Value::Object(obj)),
            },
            other => Err(other),
        }
    }
}

impl Default for Value {
    #[inline]
    fn default() -> Self {
        Value::Null
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(v) => Value::Bool(*v),
            Value::Int(v) => Value::Int(*v),
            Value::UInt(v) => Value::UInt(*v),
            Value::Float(v) => Value::Float(*v),
            Value::String(v) => Value::String(v.clone()),
            Value::Seq(v) => Value::Seq(v.clone()),
            Value::Map(v) => Value::Map(v.clone()),
            Value::Object(v) => Value::Object(v.clone_dyn()),
        }
    }
}

impl PartialEq for Value {
    /// Objects are equal when they share a class and their plain mappings
    /// are equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                if a.class().type_id() != b.class().type_id() {
                    return false;
                }
                match (a.to_plain_mapping(), b.to_plain_mapping()) {
                    (Ok(a), Ok(b)) => a == b,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => fmt::Debug::fmt(v, f),
            Value::Int(v) => fmt::Debug::fmt(v, f),
            Value::UInt(v) => fmt::Debug::fmt(v, f),
            Value::Float(v) => fmt::Debug::fmt(v, f),
            Value::String(v) => fmt::Debug::fmt(v, f),
            Value::Seq(v) => f.debug_list().entries(v).finish(),
            Value::Map(v) => fmt::Debug::fmt(v, f),
            Value::Object(v) => fmt::Debug::fmt(&**v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// From

macro_rules! impl_from_for_value {
    ($($ty:ty => |$v:ident| $expr:expr),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from($v: $ty) -> Self {
                    $expr
                }
            }
        )*
    };
}

impl_from_for_value! {
    bool => |v| Value::Bool(v),
    i32 => |v| Value::Int(i64::from(v)),
    i64 => |v| Value::Int(v),
    u32 => |v| Value::Int(i64::from(v)),
    u64 => |v| match i64::try_from(v) {
        Ok(v) => Value::Int(v),
        Err(_) => Value::UInt(v),
    },
    f64 => |v| Value::Float(v),
    &str => |v| Value::String(v.into()),
    String => |v| Value::String(v),
    Vec<Value> => |v| Value::Seq(v),
    Mapping => |v| Value::Map(v),
    Box<dyn DynDto> => |v| Value::Object(v),
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::Value;
    use crate::mapping;

    #[test]
    fn kinds_and_accessors() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(3).as_int(), Some(3));
        assert_eq!(Value::from(3).as_float(), Some(3.0));
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert!(Value::from(true).as_int().is_none());
        assert_eq!(Value::from(7_u64), Value::Int(7));
        assert_eq!(Value::from(u64::MAX).as_uint(), Some(u64::MAX));
        assert!(Value::from(u64::MAX).as_int().is_none());
        assert_eq!(Value::Int(-1).as_uint(), None);
    }

    #[test]
    fn nested_equality() {
        let a = Value::Seq(vec![Value::Map(mapping! { "k" => 1 }), Value::Null]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Value::Seq(vec![]));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }
}
