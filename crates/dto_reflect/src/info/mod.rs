//! Per-class metadata built once by `#[derive(Dto)]`.
//!
//! A [`ClassInfo`] lists the stored slots and declared accessors of a DTO,
//! each with a [`Visibility`], plus the data the type resolver and the
//! construction path need. It lives in a [`ClassInfoCell`] and is immutable
//! once published.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod class_info;
mod member_info;

// -----------------------------------------------------------------------------
// Exports

pub use cell::ClassInfoCell;
pub use class_info::{ClassInfo, ConstructFn, ConstructKind};
pub use member_info::{AccessorInfo, AccessorKind, SlotInfo, TypeHint, Visibility};
