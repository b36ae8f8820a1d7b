//! Paths into `dto_reflect` used by the generated code.
//!
//! The crate root itself is found through the caller's manifest,
//! see [`dto_reflect`].

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `dto_reflect` crate.
///
/// 1. For crates that depend on `dto_reflect`, `::dto_reflect` is returned.
/// 2. For crates that depend on `dto_core`, `::dto_core::reflect` is returned.
/// 3. Otherwise `::dto_reflect` is returned, which may be incorrect.
///
/// This reads the manifest, so the path is computed once per derive and
/// passed around.
pub(crate) fn dto_reflect() -> syn::Path {
    dto_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("dto_reflect"))
}

#[inline(always)]
pub(crate) fn macro_exports_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #dto_reflect_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #dto_reflect_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn info_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #dto_reflect_path::info
    }
}

#[inline(always)]
pub(crate) fn value_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #dto_reflect_path::value::Value
    }
}

#[inline(always)]
pub(crate) fn mapping_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #dto_reflect_path::value::Mapping
    }
}

#[inline(always)]
pub(crate) fn dto_error_(dto_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #dto_reflect_path::DtoError
    }
}
