#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use dto_reflect as reflect;
pub use dto_utils as utils;

pub use dto_reflect::derive::Dto;
pub use dto_reflect::{Dto, DtoError, DynDto, Mapping, Value, mapping};
