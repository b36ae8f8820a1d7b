//! Fixture classes and end-to-end tests.

pub(crate) mod dtos;

mod hydration;
mod json;
