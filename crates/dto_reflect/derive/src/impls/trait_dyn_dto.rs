use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DtoStruct;

/// Name-based dispatch over slots and accessors.
///
/// Arms exist for every slot and accessor regardless of visibility; the
/// engine checks `ClassInfo` before dispatching.
pub(crate) fn impl_trait_dyn_dto(data: &DtoStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let macro_exports_ = crate::path::macro_exports_(dto_reflect_path);
    let info_ = crate::path::info_(dto_reflect_path);
    let value_ = crate::path::value_(dto_reflect_path);
    let dto_error_ = crate::path::dto_error_(dto_reflect_path);
    let ident = data.ident();

    let slot_names: Vec<&str> = data.slots().map(|field| field.name.as_str()).collect();
    let slot_members: Vec<_> = data.slots().map(|field| field.member).collect();
    let slot_types: Vec<_> = data.slots().map(|field| field.ty).collect();

    let getters = data.getters();
    let getter_names = getters.iter().map(|(name, _)| name);
    let getter_paths = getters.iter().map(|(_, acc)| &acc.path);

    let setters = data.setters();
    let setter_names = setters.iter().map(|(name, _, _)| name);
    let setter_paths = setters.iter().map(|(_, acc, _)| &acc.path);

    quote! {
        impl #dto_reflect_path::DynDto for #ident {
            #[inline]
            fn class(&self) -> &'static #info_::ClassInfo {
                <Self as #dto_reflect_path::Dto>::class_info()
            }

            fn read_slot(&self, name: &str) -> ::core::option::Option<#value_> {
                match name {
                    #( #slot_names => ::core::option::Option::Some(
                        #dto_reflect_path::ToValue::to_value(&self.#slot_members)
                    ), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn write_slot(
                &mut self,
                name: &str,
                value: #value_,
            ) -> ::core::option::Option<::core::result::Result<(), #dto_error_>> {
                match name {
                    #( #slot_names => ::core::option::Option::Some(
                        match #macro_exports_::typed::<#slot_types>(__TYPE_PATH, name, value) {
                            ::core::result::Result::Ok(v) => {
                                self.#slot_members = v;
                                ::core::result::Result::Ok(())
                            }
                            ::core::result::Result::Err(e) => ::core::result::Result::Err(e),
                        }
                    ), )*
                    _ => {
                        let _ = value;
                        ::core::option::Option::None
                    }
                }
            }

            fn invoke_getter(&self, name: &str) -> ::core::option::Option<#value_> {
                match name {
                    #( #getter_names => ::core::option::Option::Some(
                        #dto_reflect_path::ToValue::to_value(&#getter_paths(self))
                    ), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn invoke_setter(
                &mut self,
                name: &str,
                value: #value_,
            ) -> ::core::option::Option<::core::result::Result<(), #dto_error_>> {
                match name {
                    #( #setter_names => ::core::option::Option::Some(
                        match #macro_exports_::typed(__TYPE_PATH, name, value) {
                            ::core::result::Result::Ok(v) => #macro_exports_::SetterOutput::into_result(
                                #setter_paths(self, v),
                                __TYPE_PATH,
                                name,
                            ),
                            ::core::result::Result::Err(e) => ::core::result::Result::Err(e),
                        }
                    ), )*
                    _ => {
                        let _ = value;
                        ::core::option::Option::None
                    }
                }
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(
                self: #macro_exports_::Box<Self>,
            ) -> #macro_exports_::Box<dyn ::core::any::Any> {
                self
            }

            #[inline]
            fn clone_dyn(&self) -> #macro_exports_::Box<dyn #dto_reflect_path::DynDto> {
                #macro_exports_::Box::new(::core::clone::Clone::clone(self))
            }
        }
    }
}
