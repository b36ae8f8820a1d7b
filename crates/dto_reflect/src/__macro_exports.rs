//! Items referenced by code generated from `#[derive(Dto)]`. Not public API.

use crate::dto::Dto;
use crate::error::{DtoError, ValueError};
use crate::hydrate::{FieldDescriptor, coerce};
use crate::info::ClassInfo;
use crate::value::{FromValue, Mapping, Value};

pub use alloc::boxed::Box;
pub use serde_core;

// -----------------------------------------------------------------------------
// Value conversion

/// `FromValue` for derived DTOs: an object of class `T` is unwrapped, a map
/// is constructed.
pub fn dto_from_value<T: Dto>(value: Value) -> Result<T, ValueError> {
    match value {
        Value::Object(obj) => match obj.downcast::<T>() {
            Ok(dto) => Ok(*dto),
            Err(_) => Err(ValueError::Mismatch {
                expected: T::class_info().type_path(),
                found: "object",
            }),
        },
        Value::Map(mapping) => T::construct(mapping).map_err(ValueError::from),
        other => Err(ValueError::mismatch(T::class_info().type_path(), &other)),
    }
}

/// Converts the value for field `field` of `class`.
#[inline]
pub fn typed<T: FromValue>(class: &'static str, field: &str, value: Value) -> Result<T, DtoError> {
    T::from_value(value).map_err(|err| DtoError::invalid_value(class, field, err))
}

/// Pulls, coerces and converts the next positional constructor argument.
/// A missing argument is `Null`.
pub fn positional<T: FromValue>(
    values: &mut impl Iterator<Item = Value>,
    class: &'static ClassInfo,
    field: &str,
) -> Result<T, DtoError> {
    let raw = values.next().unwrap_or(Value::Null);
    let value = coerce(&FieldDescriptor::describe(class, field), raw).map_err(|err| {
        DtoError::invalid_value(class.type_path(), field, ValueError::from(err))
    })?;
    typed(class.type_path(), field, value)
}

/// Runs the hydrate construction path.
pub fn hydrate_default<T: Dto + Default>(mapping: Mapping) -> Result<T, DtoError> {
    let mut dto = T::default();
    crate::hydrate::hydrate_into(&mut dto, mapping)?;
    Ok(dto)
}

// -----------------------------------------------------------------------------
// Setter output

/// Return types accepted from user setters.
pub trait SetterOutput {
    fn into_result(self, class: &'static str, field: &str) -> Result<(), DtoError>;
}

impl SetterOutput for () {
    #[inline(always)]
    fn into_result(self, _: &'static str, _: &str) -> Result<(), DtoError> {
        Ok(())
    }
}

impl SetterOutput for Result<(), DtoError> {
    #[inline(always)]
    fn into_result(self, _: &'static str, _: &str) -> Result<(), DtoError> {
        self
    }
}

impl SetterOutput for Result<(), ValueError> {
    #[inline]
    fn into_result(self, class: &'static str, field: &str) -> Result<(), DtoError> {
        self.map_err(|err| DtoError::invalid_value(class, field, err))
    }
}

// -----------------------------------------------------------------------------
// serde

pub fn serialize_dto<T: Dto, S: serde_core::Serializer>(
    dto: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde_core::Serialize;
    use serde_core::ser::Error;

    dto.to_plain_mapping()
        .map_err(S::Error::custom)?
        .serialize(serializer)
}

pub fn deserialize_dto<'de, T: Dto, D: serde_core::Deserializer<'de>>(
    deserializer: D,
) -> Result<T, D::Error> {
    use serde_core::Deserialize;
    use serde_core::de::Error;

    let mapping = Mapping::deserialize(deserializer)?;
    T::from_mapping(mapping).map_err(D::Error::custom)
}

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::dto::Dto;
    use crate::registry::ClassRegistry;

    pub use inventory;

    /// One registration collected at link time.
    pub struct __AutoRegisterFunc(pub fn(&mut ClassRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterClass {
        fn __register(registry: &mut ClassRegistry);
    }

    impl<T: Dto> __RegisterClass for T {
        #[inline]
        fn __register(registry: &mut ClassRegistry) {
            registry.register::<T>();
        }
    }

    // Only reached when the platform runs inventory constructors.
    fn __avail_flag(registry: &mut ClassRegistry) {
        registry.mark_auto_registered();
    }

    inventory::submit! { __AutoRegisterFunc(__avail_flag) }

    pub fn __register_classes(registry: &mut ClassRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
