use std::sync::OnceLock;

use crate::info::ClassInfo;

/// Container for static storage of a [`ClassInfo`].
///
/// Derived DTOs keep one in a function-local `static`; internally it is a
/// [`OnceLock`], so concurrent first access builds the info exactly once.
///
/// ## Example
///
/// ```
/// use dto_reflect::info::{ClassInfo, ClassInfoCell, SlotInfo, TypeHint, Visibility};
/// # use dto_reflect::{Dto, derive::Dto};
/// # #[derive(Dto, Clone, Default)]
/// # struct Point { pub x: i64 }
///
/// static CELL: ClassInfoCell = ClassInfoCell::new();
/// let info = CELL.get_or_init(|| {
///     ClassInfo::new::<Point>(
///         "geo::Point",
///         &[SlotInfo::new("x", Visibility::Public, TypeHint::new("i64", false))],
///     )
/// });
/// assert_eq!(info.type_name(), "Point");
/// assert_eq!(info.module_path(), "geo");
/// ```
pub struct ClassInfoCell(OnceLock<ClassInfo>);

impl ClassInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> ClassInfo) -> &ClassInfo {
        self.0.get_or_init(f)
    }
}
