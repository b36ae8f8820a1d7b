//! Coercion, hydration and serialization of DTOs.
//!
//! - [`coerce`]: shapes one raw value after its field's declared type.
//! - [`hydrate_into`]: writes a mapping into an instance through setters and slots.
//! - [`read_field`] / [`write_field`]: the external read and mutation paths.
//! - [`to_plain_mapping`]: reads every field back into a [`Mapping`](crate::Mapping);
//!   [`to_plain_tree`] also flattens nested DTOs.

// -----------------------------------------------------------------------------
// Modules

mod coerce;
mod descriptor;
mod hydrator;
mod serialize;

// -----------------------------------------------------------------------------
// Exports

pub use coerce::coerce;
pub use descriptor::FieldDescriptor;
pub use hydrator::{hydrate_into, read_field, write_field};
pub use serialize::{to_plain_mapping, to_plain_tree};
