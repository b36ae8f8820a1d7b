#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derives resolve `dto_reflect` through the caller's manifest. This crate
// derives on its own test fixtures, so the name must also resolve here.
extern crate self as dto_reflect;

// -----------------------------------------------------------------------------
// no_std support

// The class caches are process-wide and need `std::sync`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod dto;
mod error;

pub mod hydrate;
pub mod info;
pub mod registry;
pub mod value;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use dto::{Dto, DynDto};
pub use dto_reflect_derive as derive;
pub use error::{DtoError, FieldAccess, ValueError};
pub use value::{FromValue, Mapping, ToValue, Value};
