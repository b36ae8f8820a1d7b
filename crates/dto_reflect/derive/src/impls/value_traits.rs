use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DtoStruct;

/// `FromValue` accepts an object of this class or a mapping to construct
/// from; `ToValue` boxes a clone.
pub(crate) fn impl_value_traits(data: &DtoStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let macro_exports_ = crate::path::macro_exports_(dto_reflect_path);
    let value_ = crate::path::value_(dto_reflect_path);
    let ident = data.ident();

    quote! {
        impl #dto_reflect_path::FromValue for #ident {
            #[inline]
            fn from_value(value: #value_) -> ::core::result::Result<Self, #dto_reflect_path::ValueError> {
                #macro_exports_::dto_from_value::<Self>(value)
            }
        }

        impl #dto_reflect_path::ToValue for #ident {
            #[inline]
            fn to_value(&self) -> #value_ {
                #value_::Object(#macro_exports_::Box::new(::core::clone::Clone::clone(self)))
            }
        }
    }
}
