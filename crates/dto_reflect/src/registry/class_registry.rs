use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dto_utils::TypeIdMap;
use dto_utils::hash::{FixedHashState, HashMap};

use crate::dto::Dto;
use crate::info::ClassInfo;

// -----------------------------------------------------------------------------
// ClassRegistry

/// The set of constructable DTO classes.
///
/// The type resolver accepts a candidate path only if it names a class in
/// [`ClassRegistry::global`].
///
/// # Example
///
/// ```
/// use dto_reflect::{Dto, derive::Dto, registry::ClassRegistry};
///
/// #[derive(Dto, Clone, Default)]
/// #[dto(type_path = "shop::Item")]
/// struct Item {
///     pub sku: String,
/// }
///
/// let mut registry = ClassRegistry::empty();
/// assert!(registry.register::<Item>());
/// assert!(!registry.register::<Item>());
///
/// let info = registry.get_with_type_path("shop::Item").unwrap();
/// assert_eq!(info.type_name(), "Item");
/// ```
pub struct ClassRegistry {
    classes: TypeIdMap<&'static ClassInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    auto_registered: bool,
}

impl Default for ClassRegistry {
    /// See [`ClassRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            classes: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            auto_registered: false,
        }
    }

    /// Creates a registry holding every auto-registered class.
    ///
    /// Equivalent to [`empty`](Self::empty) when `auto_register` is disabled.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    /// Registers `T` if it is not registered yet.
    ///
    /// Returns `true` if the class was added.
    #[inline]
    pub fn register<T: Dto>(&mut self) -> bool {
        self.insert(T::class_info())
    }

    /// Adds `info` if its [`TypeId`] is not registered yet.
    ///
    /// A second class claiming an already registered type path is still
    /// added by [`TypeId`], but path lookups keep returning the first one.
    pub fn insert(&mut self, info: &'static ClassInfo) -> bool {
        let type_path_to_id = &mut self.type_path_to_id;
        self.classes.try_insert(info.type_id(), || {
            match type_path_to_id.get(info.type_path()) {
                Some(_) => log::warn!(
                    "class `{}` registered twice with different types; path lookups keep the first",
                    info.type_path(),
                ),
                None => {
                    type_path_to_id.insert(info.type_path(), info.type_id());
                }
            }
            info
        })
    }

    /// Registers every class collected by `inventory`.
    ///
    /// Returns `true` if automatic registration is supported and has run.
    /// Repeated calls are cheap and insert nothing twice.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if !self.auto_registered {
                crate::__macro_exports::auto_register::__register_classes(self);
            }
        }
        self.auto_registered
    }

    /// Marks inventory collection as having reached this registry.
    #[cfg(feature = "auto_register")]
    #[inline]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.classes.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static ClassInfo> {
        self.classes.get(&type_id).copied()
    }

    /// Returns the class registered under the fully qualified `type_path`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static ClassInfo> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates over the registered classes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &'static ClassInfo> + '_ {
        self.classes.values().copied()
    }

    // -------------------------------------------------------------------------
    // Global

    /// The process-wide registry, created with [`ClassRegistry::new`] on
    /// first access.
    pub fn global() -> &'static RwLock<ClassRegistry> {
        static GLOBAL: OnceLock<RwLock<ClassRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| RwLock::new(ClassRegistry::new()))
    }

    /// Takes a read lock on [`ClassRegistry::global`].
    pub fn read_global() -> RwLockReadGuard<'static, ClassRegistry> {
        Self::global().read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on [`ClassRegistry::global`].
    pub fn write_global() -> RwLockWriteGuard<'static, ClassRegistry> {
        Self::global()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ClassRegistry;
    use crate::Dto;
    use crate::tests::dtos::ChildDto;

    #[test]
    fn register_indexes_by_path_and_id() {
        let mut registry = ClassRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.register::<ChildDto>());
        assert!(!registry.register::<ChildDto>());

        let info = ChildDto::class_info();
        assert!(registry.contains(info.type_id()));
        assert!(core::ptr::eq(
            registry.get_with_type_path(info.type_path()).unwrap(),
            info
        ));
        assert!(registry.get_with_type_path("nowhere::ChildDto").is_none());
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_collects_derived_classes() {
        use crate::tests::dtos::RootDto;

        let mut registry = ClassRegistry::empty();
        assert!(registry.auto_register());
        assert!(registry.contains(RootDto::class_info().type_id()));
        assert!(registry.contains(ChildDto::class_info().type_id()));

        let len = registry.len();
        assert!(registry.auto_register());
        assert_eq!(registry.len(), len);
    }
}
