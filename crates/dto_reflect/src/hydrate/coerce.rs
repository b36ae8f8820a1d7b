use alloc::vec::Vec;

use crate::error::DtoError;
use crate::hydrate::FieldDescriptor;
use crate::value::{Mapping, Value};

/// Shapes `raw` after the field's declared type.
///
/// Rules, in order:
///
/// 1. `Null` and `Object` pass through; an object is never re-wrapped.
/// 2. Without a resolved type the value passes through.
/// 3. For an array field, a `Seq` or `Map` is walked element-wise: each
///    `Map` element is constructed into the resolved type, anything else
///    passes through, and keys and order are preserved. Other values pass
///    through.
/// 4. For a single field, a `Map` is constructed into the resolved type.
///    Other values pass through and are left to the field's typed writer.
///
/// Errors come only from nested construction.
pub fn coerce(descriptor: &FieldDescriptor<'_>, raw: Value) -> Result<Value, DtoError> {
    if matches!(raw, Value::Null | Value::Object(_)) {
        return Ok(raw);
    }
    let Some(ty) = descriptor.ty else {
        return Ok(raw);
    };

    let construct = |value: Value| -> Result<Value, DtoError> {
        match value {
            Value::Map(mapping) => ty.construct(mapping).map(Value::Object),
            other => Ok(other),
        }
    };

    if !descriptor.is_array {
        return construct(raw);
    }

    match raw {
        Value::Seq(items) => items
            .into_iter()
            .map(construct)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Seq),
        Value::Map(entries) => {
            let mut out = Mapping::with_capacity(entries.len());
            for (key, item) in entries {
                out.insert(key, construct(item)?);
            }
            Ok(Value::Map(out))
        }
        other => Ok(other),
    }
}
