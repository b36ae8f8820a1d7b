//! Process-wide caches consulted during hydration.
//!
//! ## Menu
//!
//! - [`ClassRegistry`]: the set of known constructable DTO classes, by path and [`TypeId`].
//! - [`FieldRegistry`]: the ordered accessible field names of each class.
//! - [`TypeResolver`]: declared type tokens resolved to registered classes.
//!
//! All three are populated lazily and never evicted. Published entries are
//! immutable `'static` data; concurrent first access is resolved
//! first-writer-wins.
//!
//! ## auto_register
//!
//! With the `auto_register` feature every `#[derive(Dto)]` type (unless
//! `#[dto(auto_register = false)]`) is collected through the [`inventory`]
//! crate and added to [`ClassRegistry::global`] on first use.
//! Without it, register classes explicitly before resolving hints that
//! name them.
//!
//! [`TypeId`]: core::any::TypeId
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod class_registry;
mod field_registry;
mod type_resolver;

// -----------------------------------------------------------------------------
// Exports

pub use class_registry::ClassRegistry;
pub use field_registry::FieldRegistry;
pub use type_resolver::TypeResolver;
