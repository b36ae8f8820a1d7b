use quote::quote_spanned;

use crate::derive_data::DtoStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(data: &DtoStruct) -> proc_macro2::TokenStream {
    if let Some(span) = data.attrs().auto_register {
        let auto_register_ = crate::path::auto_register_(data.dto_reflect_path());
        let ident = data.ident();

        quote_spanned! { span =>
            #auto_register_::inventory::submit!{
                #auto_register_::__AutoRegisterFunc(
                    <#ident as #auto_register_::__RegisterClass>::__register
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &DtoStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
