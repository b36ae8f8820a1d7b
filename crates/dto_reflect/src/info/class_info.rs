use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::dto::{Dto, DynDto};
use crate::error::DtoError;
use crate::info::{AccessorInfo, AccessorKind, SlotInfo};
use crate::value::Mapping;

// -----------------------------------------------------------------------------
// ConstructKind

/// How a DTO is built from a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConstructKind {
    /// `Default::default()`, then hydrate every entry through setters and slots.
    #[default]
    Hydrate,
    /// A user function receives the whole mapping.
    Mapping,
    /// The mapping's values, in the mapping's order, fill the fields in
    /// declaration order. Missing values are `Null`, surplus values are dropped.
    ///
    /// Keys are not matched against field names; the caller must supply
    /// them in declaration order.
    Positional,
}

/// Type-erased construction entry point stored in a [`ClassInfo`].
pub type ConstructFn = fn(Mapping) -> Result<Box<dyn DynDto>, DtoError>;

fn construct_dyn<T: Dto>(mapping: Mapping) -> Result<Box<dyn DynDto>, DtoError> {
    T::construct(mapping).map(|dto| Box::new(dto) as Box<dyn DynDto>)
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Metadata of a concrete DTO type.
///
/// # Examples
///
/// ```
/// use dto_reflect::{Dto, derive::Dto, info::Visibility};
///
/// #[derive(Dto, Clone, Default)]
/// struct Child {
///     pub id: i64,
///     pub(crate) name: Option<String>,
///     secret: String,
/// }
///
/// let info = Child::class_info();
/// assert_eq!(info.type_name(), "Child");
/// assert_eq!(info.slot("name").map(|s| s.visibility()), Some(Visibility::Restricted));
/// assert_eq!(info.slot("secret").map(|s| s.visibility()), Some(Visibility::Private));
/// assert!(info.ignore_undefined_fields());
/// ```
pub struct ClassInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    module_path: &'static str,
    slots: Box<[SlotInfo]>,
    accessors: Box<[AccessorInfo]>,
    uses: &'static [&'static str],
    ignore_undefined_fields: bool,
    construct_kind: ConstructKind,
    construct: ConstructFn,
}

impl ClassInfo {
    /// Creates the info for `T` with its stored slots in declaration order.
    ///
    /// `type_path` is the fully qualified path (`module::Type`); the module
    /// path and the type name are split off it.
    pub fn new<T: Dto>(type_path: &'static str, slots: &[SlotInfo]) -> Self {
        let (module_path, type_name) = match type_path.rsplit_once("::") {
            Some((module, name)) => (module, name),
            None => ("", type_path),
        };

        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_name,
            module_path,
            slots: slots.into(),
            accessors: Box::new([]),
            uses: &[],
            ignore_undefined_fields: true,
            construct_kind: ConstructKind::Hydrate,
            construct: construct_dyn::<T>,
        }
    }

    /// Sets the declared getters and setters, in declaration order.
    pub fn with_accessors(mut self, accessors: &[AccessorInfo]) -> Self {
        self.accessors = accessors.into();
        self
    }

    /// Sets the paths imported for resolving unqualified type hints.
    #[inline]
    pub fn with_uses(mut self, uses: &'static [&'static str]) -> Self {
        self.uses = uses;
        self
    }

    #[inline]
    pub fn with_ignore_undefined_fields(mut self, ignore: bool) -> Self {
        self.ignore_undefined_fields = ignore;
        self
    }

    #[inline]
    pub fn with_construct_kind(mut self, kind: ConstructKind) -> Self {
        self.construct_kind = kind;
        self
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub const fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// Stored slots in declaration order.
    #[inline]
    pub fn slots(&self) -> &[SlotInfo] {
        &self.slots
    }

    /// Declared accessors in declaration order.
    #[inline]
    pub fn accessors(&self) -> &[AccessorInfo] {
        &self.accessors
    }

    #[inline]
    pub const fn uses(&self) -> &'static [&'static str] {
        self.uses
    }

    /// Whether unknown input keys are skipped (`true`) or rejected.
    #[inline]
    pub const fn ignore_undefined_fields(&self) -> bool {
        self.ignore_undefined_fields
    }

    #[inline]
    pub const fn construct_kind(&self) -> ConstructKind {
        self.construct_kind
    }

    pub fn slot(&self, name: &str) -> Option<&SlotInfo> {
        self.slots.iter().find(|slot| slot.name() == name)
    }

    pub fn getter(&self, field: &str) -> Option<&AccessorInfo> {
        self.accessor(field, AccessorKind::Getter)
    }

    pub fn setter(&self, field: &str) -> Option<&AccessorInfo> {
        self.accessor(field, AccessorKind::Setter)
    }

    fn accessor(&self, field: &str, kind: AccessorKind) -> Option<&AccessorInfo> {
        self.accessors
            .iter()
            .find(|acc| acc.kind() == kind && acc.field() == field)
    }

    /// Builds a new instance of this class from `mapping`.
    #[inline]
    pub fn construct(&self, mapping: Mapping) -> Result<Box<dyn DynDto>, DtoError> {
        (self.construct)(mapping)
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("type_path", &self.type_path)
            .field("slots", &self.slots)
            .field("accessors", &self.accessors)
            .field("uses", &self.uses)
            .field("ignore_undefined_fields", &self.ignore_undefined_fields)
            .field("construct_kind", &self.construct_kind)
            .finish_non_exhaustive()
    }
}
