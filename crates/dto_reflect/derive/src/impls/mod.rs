// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod serde;
mod trait_dto;
mod trait_dyn_dto;
mod value_traits;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DtoStruct;

/// Expands the whole derive.
///
/// ```ignore
/// const _: () = {
///     const __TYPE_PATH: &str = "..";
///     impl DynDto for T { .. }
///     impl Dto for T { .. }
///     ..
/// };
/// ```
pub(crate) fn impl_dto(data: &DtoStruct) -> TokenStream {
    let type_path = data.type_path_expr();
    let assert_uses = assert_uses(data);

    let dyn_dto = trait_dyn_dto::impl_trait_dyn_dto(data);
    let dto = trait_dto::impl_trait_dto(data);
    let value_traits = value_traits::impl_value_traits(data);
    let serde = serde::impl_serde(data);
    let auto_register = auto_register::get_auto_register_impl(data);

    quote! {
        const _: () = {
            const __TYPE_PATH: &::core::primitive::str = #type_path;

            #assert_uses

            #dyn_dto

            #dto

            #value_traits

            #serde

            #auto_register
        };
    }
}

// Every `uses` entry must name a type in scope.
fn assert_uses(data: &DtoStruct) -> TokenStream {
    let uses = &data.attrs().uses;
    if uses.is_empty() {
        return crate::utils::empty();
    }

    quote! {
        #[allow(dead_code)]
        fn __assert_uses() {
            #( let _: ::core::option::Option<#uses> = ::core::option::Option::None; )*
        }
    }
}
