use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::error::DtoError;
use crate::hydrate;
use crate::info::ClassInfo;
use crate::registry::FieldRegistry;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// DynDto

/// The object-safe half of a DTO.
///
/// Implemented by `#[derive(Dto)]`. The `read_slot` / `write_slot` /
/// `invoke_*` methods are raw dispatch by name: they return `None` when no
/// such member exists and never check [`Visibility`](crate::info::Visibility).
/// Access rules live in [`hydrate`], which consults [`ClassInfo`] first.
pub trait DynDto: Any + Send + Sync {
    /// Returns the metadata of the concrete type.
    fn class(&self) -> &'static ClassInfo;

    /// Reads the stored slot `name`.
    fn read_slot(&self, name: &str) -> Option<Value>;

    /// Writes the stored slot `name` through its typed conversion.
    fn write_slot(&mut self, name: &str, value: Value) -> Option<Result<(), DtoError>>;

    /// Calls the getter declared for field `name`.
    fn invoke_getter(&self, name: &str) -> Option<Value>;

    /// Calls the setter declared for field `name`.
    fn invoke_setter(&mut self, name: &str, value: Value) -> Option<Result<(), DtoError>>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_dyn(&self) -> Box<dyn DynDto>;
}

impl dyn DynDto {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: DynDto>(&self) -> bool {
        self.class().type_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: DynDto>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: DynDto>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Downcasts the box, handing it back unchanged on mismatch.
    pub fn downcast<T: DynDto>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(dto) => Ok(dto),
            Err(_) => unreachable!("class type id matched"),
        }
    }

    /// See [`hydrate::read_field`].
    #[inline]
    pub fn get(&self, name: &str) -> Result<Value, DtoError> {
        hydrate::read_field(self, name)
    }

    /// See [`hydrate::write_field`].
    #[inline]
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), DtoError> {
        hydrate::write_field(self, name, value.into())
    }

    /// The accessible field names, in registry order.
    #[inline]
    pub fn fields(&self) -> &'static [&'static str] {
        FieldRegistry::fields(self.class())
    }

    /// Whether `name` is one of [`fields`](Self::fields).
    #[inline]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields().contains(&name)
    }

    /// See [`hydrate::to_plain_mapping`].
    #[inline]
    pub fn to_plain_mapping(&self) -> Result<Mapping, DtoError> {
        hydrate::to_plain_mapping(self)
    }
}

impl fmt::Debug for dyn DynDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class().type_name())?;
        match self.to_plain_mapping() {
            Ok(mapping) => {
                f.write_str(" ")?;
                fmt::Debug::fmt(&mapping, f)
            }
            Err(_) => f.write_str(" { .. }"),
        }
    }
}

// -----------------------------------------------------------------------------
// Dto

/// A concrete DTO type.
///
/// Implemented by `#[derive(Dto)]`, which also implements [`DynDto`],
/// [`FromValue`](crate::FromValue), [`ToValue`](crate::ToValue) and, unless
/// disabled, the serde traits.
///
/// # Examples
///
/// ```
/// use dto_reflect::{Dto, derive::Dto, mapping};
///
/// #[derive(Dto, Clone, Default)]
/// struct Child {
///     pub id: i64,
///     pub name: Option<String>,
/// }
///
/// let child = Child::from_mapping(mapping! { "id" => 20, "name" => "Joe" }).unwrap();
/// assert_eq!(child.id, 20);
/// assert_eq!(Child::field_names(), ["id", "name"]);
/// assert_eq!(child.get("name").unwrap().as_str(), Some("Joe"));
/// ```
pub trait Dto: DynDto + Clone {
    /// Returns the metadata of this type.
    fn class_info() -> &'static ClassInfo;

    /// Builds an instance along the type's construction path.
    ///
    /// A failure drops the partially built instance.
    fn construct(mapping: Mapping) -> Result<Self, DtoError>;

    /// Hydrates a new instance from `mapping`.
    #[inline]
    fn from_mapping(mapping: Mapping) -> Result<Self, DtoError> {
        Self::construct(mapping)
    }

    /// The accessible field names, in registry order.
    #[inline]
    fn field_names() -> &'static [&'static str] {
        FieldRegistry::fields(Self::class_info())
    }

    #[inline]
    fn get(&self, name: &str) -> Result<Value, DtoError> {
        hydrate::read_field(self, name)
    }

    #[inline]
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), DtoError> {
        hydrate::write_field(self, name, value.into())
    }

    #[inline]
    fn has_field(&self, name: &str) -> bool {
        Self::field_names().contains(&name)
    }

    #[inline]
    fn to_plain_mapping(&self) -> Result<Mapping, DtoError> {
        hydrate::to_plain_mapping(self)
    }
}
