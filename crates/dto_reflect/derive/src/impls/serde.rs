use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DtoStruct;

/// `Serialize` as the plain mapping, `Deserialize` through `from_mapping`.
pub(crate) fn impl_serde(data: &DtoStruct) -> TokenStream {
    if !data.attrs().serde {
        return crate::utils::empty();
    }

    let macro_exports_ = crate::path::macro_exports_(data.dto_reflect_path());
    let ident = data.ident();

    quote! {
        impl #macro_exports_::serde_core::Serialize for #ident {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: #macro_exports_::serde_core::Serializer,
            {
                #macro_exports_::serialize_dto(self, serializer)
            }
        }

        impl<'de> #macro_exports_::serde_core::Deserialize<'de> for #ident {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: #macro_exports_::serde_core::Deserializer<'de>,
            {
                #macro_exports_::deserialize_dto::<Self, D>(deserializer)
            }
        }
    }
}
