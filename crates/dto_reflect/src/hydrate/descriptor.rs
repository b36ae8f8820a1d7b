use crate::info::{ClassInfo, TypeHint};
use crate::registry::TypeResolver;

/// What coercion needs to know about one field.
///
/// `ty` is the resolved nested class, or `None` when the value passes
/// through untouched.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor<'a> {
    pub name: &'a str,
    pub ty: Option<&'static ClassInfo>,
    pub is_array: bool,
}

impl<'a> FieldDescriptor<'a> {
    /// A descriptor that never coerces; used for unknown fields.
    #[inline]
    pub const fn untyped(name: &'a str) -> Self {
        Self {
            name,
            ty: None,
            is_array: false,
        }
    }

    /// Describes field `name` of `class`.
    ///
    /// The slot's hint is used first, then a hint carried by the setter.
    /// The hint's token goes through [`TypeResolver::resolve`].
    pub fn describe(class: &ClassInfo, name: &'a str) -> Self {
        let hint: Option<TypeHint> = match class.slot(name) {
            Some(slot) => Some(slot.hint()),
            None => class.setter(name).and_then(|setter| setter.hint()),
        };

        match hint {
            Some(hint) => Self {
                name,
                ty: TypeResolver::resolve(class, hint.token()),
                is_array: hint.is_array(),
            },
            None => Self::untyped(name),
        }
    }
}
