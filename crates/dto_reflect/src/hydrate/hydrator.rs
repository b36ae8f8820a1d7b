use crate::dto::DynDto;
use crate::error::{DtoError, FieldAccess, ValueError};
use crate::hydrate::{FieldDescriptor, coerce};
use crate::info::ClassInfo;
use crate::registry::FieldRegistry;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// Construction

/// Writes every entry of `mapping` into `dto`, in the mapping's order.
///
/// For each key the value is coerced, then written through a `Public` or
/// `Restricted` setter if one is declared, else into a `Public` or
/// `Restricted` slot. A key matching neither is skipped, or rejected with
/// [`DtoError::UnknownField`] when the class does not ignore undefined
/// fields.
///
/// On error `dto` may be partially written; construction paths hydrate a
/// fresh instance and drop it.
pub fn hydrate_into(dto: &mut dyn DynDto, mapping: Mapping) -> Result<(), DtoError> {
    let class = dto.class();

    for (name, raw) in mapping {
        let descriptor = FieldDescriptor::describe(class, &name);
        let value = coerce(&descriptor, raw).map_err(|err| nested_error(class, &name, err))?;

        if class
            .setter(&name)
            .is_some_and(|setter| setter.visibility().is_accessible())
        {
            dispatched(dto.invoke_setter(&name, value), class, &name)?;
            continue;
        }

        if class
            .slot(&name)
            .is_some_and(|slot| slot.visibility().is_accessible())
        {
            dispatched(dto.write_slot(&name, value), class, &name)?;
            continue;
        }

        if class.ignore_undefined_fields() {
            log::trace!("ignored undefined field `{name}` of `{}`", class.type_path());
            continue;
        }
        return Err(DtoError::unknown_field(
            class.type_path(),
            &name,
            FieldAccess::Write,
        ));
    }

    Ok(())
}

#[inline]
fn nested_error(class: &ClassInfo, name: &str, err: DtoError) -> DtoError {
    DtoError::invalid_value(class.type_path(), name, ValueError::from(err))
}

// Metadata and dispatch are generated together; a miss means the member
// is not callable and counts as unknown.
#[inline]
fn dispatched(
    result: Option<Result<(), DtoError>>,
    class: &ClassInfo,
    name: &str,
) -> Result<(), DtoError> {
    result.unwrap_or_else(|| {
        Err(DtoError::unknown_field(
            class.type_path(),
            name,
            FieldAccess::Write,
        ))
    })
}

// -----------------------------------------------------------------------------
// Access

/// Reads field `name` of `dto`.
///
/// The name must be one of the class's [fields](FieldRegistry::fields);
/// otherwise the read fails with [`DtoError::UnknownField`] regardless of
/// the undefined-field policy. An accessible getter takes precedence over
/// the slot.
pub fn read_field(dto: &dyn DynDto, name: &str) -> Result<Value, DtoError> {
    let class = dto.class();
    let unknown = || DtoError::unknown_field(class.type_path(), name, FieldAccess::Read);

    if !FieldRegistry::fields(class).contains(&name) {
        return Err(unknown());
    }

    let value = if class
        .getter(name)
        .is_some_and(|getter| getter.visibility().is_accessible())
    {
        dto.invoke_getter(name)
    } else {
        dto.read_slot(name)
    };
    value.ok_or_else(unknown)
}

/// Mutates field `name` of an existing `dto`.
///
/// Only a `Public` setter may be used; there is no slot fallback. The value
/// is coerced like during hydration.
pub fn write_field(dto: &mut dyn DynDto, name: &str, value: Value) -> Result<(), DtoError> {
    let class = dto.class();

    if !class
        .setter(name)
        .is_some_and(|setter| setter.visibility().is_public())
    {
        return Err(DtoError::unknown_field(
            class.type_path(),
            name,
            FieldAccess::Write,
        ));
    }

    let descriptor = FieldDescriptor::describe(class, name);
    let value = coerce(&descriptor, value).map_err(|err| nested_error(class, name, err))?;
    dispatched(dto.invoke_setter(name, value), class, name)
}
