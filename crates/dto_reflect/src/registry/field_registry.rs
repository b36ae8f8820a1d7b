use alloc::boxed::Box;
use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock};

use dto_utils::TypeIdMap;

use crate::info::{AccessorKind, ClassInfo};

static FIELDS: RwLock<TypeIdMap<&'static [&'static str]>> = RwLock::new(TypeIdMap::new());

// -----------------------------------------------------------------------------
// FieldRegistry

/// Cache of the accessible field names of each class.
///
/// The list is accessible getters first, then accessible slots whose name
/// does not start with `_`, each in declaration order, with duplicates
/// dropped keeping the first occurrence.
///
/// It is computed once per class; every later call returns the same slice.
///
/// # Examples
///
/// ```
/// use dto_reflect::{Dto, derive::Dto, registry::FieldRegistry};
///
/// #[derive(Dto, Clone, Default)]
/// struct Account {
///     pub id: i64,
///     pub(crate) owner: String,
///     pub _cache: Option<String>,
///     token: String,
///     #[dto(get = Account::label)]
///     pub label: String,
/// }
///
/// impl Account {
///     pub fn label(&self) -> String {
///         self.label.to_uppercase()
///     }
/// }
///
/// let fields = FieldRegistry::fields(Account::class_info());
/// assert_eq!(fields, ["label", "id", "owner"]);
/// assert!(core::ptr::eq(fields, Account::field_names()));
/// ```
pub struct FieldRegistry;

impl FieldRegistry {
    /// Returns the ordered accessible field names of `class`.
    ///
    /// A class without accessible members yields an empty slice.
    #[inline(never)]
    pub fn fields(class: &ClassInfo) -> &'static [&'static str] {
        let type_id = class.type_id();

        if let Some(fields) = FIELDS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
        {
            return fields;
        }

        // Compute outside the lock; the first writer publishes.
        let fields = Self::collect(class);

        let mut cache = FIELDS.write().unwrap_or_else(PoisonError::into_inner);
        *cache.get_or_insert(type_id, || {
            log::trace!("fields of `{}`: {fields:?}", class.type_path());
            Box::leak(fields.into_boxed_slice())
        })
    }

    fn collect(class: &ClassInfo) -> Vec<&'static str> {
        let getters = class
            .accessors()
            .iter()
            .filter(|acc| acc.kind() == AccessorKind::Getter && acc.visibility().is_accessible())
            .map(|acc| acc.field());

        let slots = class
            .slots()
            .iter()
            .filter(|slot| slot.visibility().is_accessible() && !slot.name().starts_with('_'))
            .map(|slot| slot.name());

        let mut fields: Vec<&'static str> = Vec::new();
        for name in getters.chain(slots) {
            if !fields.contains(&name) {
                fields.push(name);
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::vec::Vec;

    use super::FieldRegistry;
    use crate::Dto;
    use crate::tests::dtos::{ChildDto, EmptyDto, ReadWriteDto, RootDto};

    #[test]
    fn getters_come_before_slots() {
        assert_eq!(
            RootDto::field_names(),
            [
                "lastName",
                "id",
                "firstName",
                "patronymic",
                "data",
                "child",
                "subChild",
                "children",
                "foo",
                "fooBar",
                "readonly",
                "readonlyArr",
            ]
        );
        assert_eq!(ChildDto::field_names(), ["id", "name"]);
    }

    #[test]
    fn restricted_slots_are_fields() {
        assert_eq!(ReadWriteDto::field_names(), ["id", "firstname", "lastname"]);
    }

    #[test]
    fn empty_class_has_no_fields() {
        assert!(EmptyDto::field_names().is_empty());
    }

    #[test]
    fn concurrent_first_access_publishes_once() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| FieldRegistry::fields(ReadWriteDto::class_info()).as_ptr() as usize))
            .collect();
        let ptrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(
            ptrs[0],
            FieldRegistry::fields(ReadWriteDto::class_info()).as_ptr() as usize
        );
    }
}
