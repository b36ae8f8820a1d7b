use alloc::vec::Vec;

use crate::dto::DynDto;
use crate::error::DtoError;
use crate::hydrate::read_field;
use crate::registry::FieldRegistry;
use crate::value::{Mapping, Value};

/// Reads every field of `dto`, in registry order, through the read path.
///
/// Nested DTOs stay [`Value::Object`]; encoders recurse into them through
/// the same contract. A field holding null yields [`Value::Null`].
pub fn to_plain_mapping(dto: &dyn DynDto) -> Result<Mapping, DtoError> {
    let fields = FieldRegistry::fields(dto.class());
    let mut mapping = Mapping::with_capacity(fields.len());
    for name in fields {
        mapping.insert(*name, read_field(dto, name)?);
    }
    Ok(mapping)
}

/// Like [`to_plain_mapping`], with nested objects flattened to maps as well.
///
/// The result holds no [`Value::Object`] and compares equal to the mapping a
/// decoder would produce from the encoded DTO.
pub fn to_plain_tree(dto: &dyn DynDto) -> Result<Mapping, DtoError> {
    flatten_entries(to_plain_mapping(dto)?)
}

fn flatten(value: Value) -> Result<Value, DtoError> {
    Ok(match value {
        Value::Object(obj) => Value::Map(to_plain_tree(&*obj)?),
        Value::Seq(items) => Value::Seq(
            items
                .into_iter()
                .map(flatten)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Map(entries) => Value::Map(flatten_entries(entries)?),
        other => other,
    })
}

fn flatten_entries(mapping: Mapping) -> Result<Mapping, DtoError> {
    let mut out = Mapping::with_capacity(mapping.len());
    for (key, value) in mapping {
        out.insert(key, flatten(value)?);
    }
    Ok(out)
}
