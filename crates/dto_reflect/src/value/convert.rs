use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ValueError;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// Traits

/// Conversion from a coerced [`Value`] into a typed field.
///
/// This is the "typed writer" of a DTO slot: the hydrator hands it whatever
/// coercion produced and the implementation accepts or rejects it.
///
/// DTOs derive it: an `Object` of the right class is unwrapped and a `Map`
/// is constructed through the type's construction path.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// Conversion of a typed field back into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

// -----------------------------------------------------------------------------
// Value / Mapping

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl ToValue for Value {
    #[inline]
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Mapping {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Map(m) => Ok(m),
            Value::Object(obj) => Ok(obj.to_plain_mapping()?),
            other => Err(ValueError::mismatch("map", &other)),
        }
    }
}

impl ToValue for Mapping {
    #[inline]
    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }
}

// -----------------------------------------------------------------------------
// Scalars

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(ValueError::mismatch("bool", &other)),
        }
    }
}

impl ToValue for bool {
    #[inline]
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_int {
    ($($ty:ident),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(v)
                            .map_err(|_| ValueError::OutOfRange { expected: stringify!($ty) }),
                        Value::UInt(v) => <$ty>::try_from(v)
                            .map_err(|_| ValueError::OutOfRange { expected: stringify!($ty) }),
                        other => Err(ValueError::mismatch(stringify!($ty), &other)),
                    }
                }
            }

            impl ToValue for $ty {
                #[inline]
                fn to_value(&self) -> Value {
                    // Only `u64` and `usize` can exceed `i64`.
                    match i64::try_from(*self) {
                        Ok(v) => Value::Int(v),
                        Err(_) => Value::UInt(*self as u64),
                    }
                }
            }
        )*
    };
}

impl_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($ty:ident),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Float(v) => Ok(v as $ty),
                        Value::Int(v) => Ok(v as $ty),
                        Value::UInt(v) => Ok(v as $ty),
                        other => Err(ValueError::mismatch(stringify!($ty), &other)),
                    }
                }
            }

            impl ToValue for $ty {
                #[inline]
                fn to_value(&self) -> Value {
                    Value::Float(f64::from(*self))
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(ValueError::mismatch("string", &other)),
        }
    }
}

impl ToValue for String {
    #[inline]
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for str {
    #[inline]
    fn to_value(&self) -> Value {
        Value::String(self.into())
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: ToValue + ?Sized> ToValue for &T {
    #[inline]
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FromValue> FromValue for Box<T> {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        T::from_value(value).map(Box::new)
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    #[inline]
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Sequences

/// A `Map` is accepted as a sequence of its values in key order.
fn seq_items(value: Value, expected: &'static str) -> Result<Vec<Value>, ValueError> {
    match value {
        Value::Seq(items) => Ok(items),
        Value::Map(m) => Ok(m.into_values().collect()),
        other => Err(ValueError::mismatch(expected, &other)),
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        seq_items(value, "seq")?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        seq_items(value, "seq")?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    #[inline]
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    #[inline]
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(ToValue::to_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{FromValue, ToValue};
    use crate::error::ValueError;
    use crate::mapping;
    use crate::value::Value;

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(u8::from_value(Value::Int(255)).ok(), Some(255));
        assert!(matches!(
            u8::from_value(Value::Int(256)),
            Err(ValueError::OutOfRange { expected: "u8" })
        ));
        assert!(matches!(
            i64::from_value(Value::from("1")),
            Err(ValueError::Mismatch { expected: "i64", found: "string" })
        ));
        assert_eq!(u64::MAX.to_value(), Value::UInt(u64::MAX));
        assert_eq!(u64::from_value(u64::MAX.to_value()).ok(), Some(u64::MAX));
        assert_eq!(usize::MAX.to_value().as_uint(), Some(usize::MAX as u64));
        assert!(matches!(
            i64::from_value(Value::UInt(u64::MAX)),
            Err(ValueError::OutOfRange { expected: "i64" })
        ));
        assert!(u64::from_value(Value::Float(1.0)).is_err());
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(f64::from_value(Value::Int(2)).ok(), Some(2.0));
        assert_eq!(1.5_f32.to_value(), Value::Float(1.5));
    }

    #[test]
    fn option_maps_null() {
        assert_eq!(Option::<String>::from_value(Value::Null).ok(), Some(None));
        assert_eq!(
            Option::<String>::from_value(Value::from("x")).ok(),
            Some(Some(String::from("x")))
        );
        assert_eq!(None::<i64>.to_value(), Value::Null);
    }

    #[test]
    fn vec_accepts_map_values_in_order() {
        let from_map = Vec::<i64>::from_value(Value::Map(mapping! { "b" => 2, "a" => 1 }));
        assert_eq!(from_map.ok(), Some(vec![2, 1]));
        let from_seq = Vec::<i64>::from_value(vec![1, 2].to_value());
        assert_eq!(from_seq.ok(), Some(vec![1, 2]));
        assert!(Vec::<i64>::from_value(Value::Int(1)).is_err());
    }
}
