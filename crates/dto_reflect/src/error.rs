use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::value::Value;

// -----------------------------------------------------------------------------
// FieldAccess

/// Direction of a field access that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAccess {
    Read,
    Write,
}

impl fmt::Display for FieldAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAccess::Read => f.write_str("read"),
            FieldAccess::Write => f.write_str("write"),
        }
    }
}

// -----------------------------------------------------------------------------
// DtoError

/// Errors raised while constructing, reading or mutating a DTO.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DtoError {
    /// The field is not accessible in the requested direction.
    ///
    /// Raised for any unknown read, an unknown write under the strict
    /// policy, and a mutation without a public setter.
    #[error("Unknown property provided to \"{class}:{field}\" ({access})")]
    UnknownField {
        class: &'static str,
        field: String,
        access: FieldAccess,
    },

    /// A typed slot, setter or constructor parameter rejected the value.
    #[error("Invalid value for \"{class}:{field}\": {source}")]
    InvalidValue {
        class: &'static str,
        field: String,
        #[source]
        source: ValueError,
    },
}

impl DtoError {
    #[inline]
    pub fn unknown_field(class: &'static str, field: &str, access: FieldAccess) -> Self {
        Self::UnknownField {
            class,
            field: field.into(),
            access,
        }
    }

    #[inline]
    pub fn invalid_value(class: &'static str, field: &str, source: ValueError) -> Self {
        Self::InvalidValue {
            class,
            field: field.into(),
            source,
        }
    }

    /// Returns the field name carried by the error.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field, .. } | Self::InvalidValue { field, .. } => field,
        }
    }
}

// -----------------------------------------------------------------------------
// ValueError

/// Errors raised by [`FromValue`](crate::FromValue) conversions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value out of range for {expected}")]
    OutOfRange { expected: &'static str },

    #[error("nested construction failed: {0}")]
    Construct(Box<DtoError>),
}

impl ValueError {
    #[inline]
    pub fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: found.kind(),
        }
    }
}

impl From<DtoError> for ValueError {
    #[inline]
    fn from(value: DtoError) -> Self {
        Self::Construct(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{DtoError, FieldAccess, ValueError};
    use crate::value::Value;

    #[test]
    fn unknown_field_message_names_class_and_field() {
        let err = DtoError::unknown_field("app::RootDto", "nope", FieldAccess::Write);
        assert_eq!(
            err.to_string(),
            "Unknown property provided to \"app::RootDto:nope\" (write)"
        );
        assert_eq!(err.field(), "nope");
    }

    #[test]
    fn invalid_value_keeps_source() {
        use core::error::Error;

        let err = DtoError::invalid_value(
            "app::ChildDto",
            "id",
            ValueError::mismatch("int", &Value::from("x")),
        );
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Invalid value for \"app::ChildDto:id\": expected int, found string"
        );
    }
}
