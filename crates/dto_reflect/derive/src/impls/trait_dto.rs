use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ConstructAttribute, DtoStruct};

/// `Dto`: the static `ClassInfo` and the construction path.
pub(crate) fn impl_trait_dto(data: &DtoStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let mapping_ = crate::path::mapping_(dto_reflect_path);
    let dto_error_ = crate::path::dto_error_(dto_reflect_path);
    let ident = data.ident();

    let class_info = class_info_expr(data);
    let construct = construct_body(data);

    quote! {
        impl #dto_reflect_path::Dto for #ident {
            fn class_info() -> &'static #dto_reflect_path::info::ClassInfo {
                static CELL: #dto_reflect_path::info::ClassInfoCell =
                    #dto_reflect_path::info::ClassInfoCell::new();
                CELL.get_or_init(|| #class_info)
            }

            fn construct(mapping: #mapping_) -> ::core::result::Result<Self, #dto_error_> {
                #construct
            }
        }
    }
}

/// ```ignore
/// ClassInfo::new::<Self>(__TYPE_PATH, &[SlotInfo::new(..), ..])
///     .with_accessors(&[..])
///     .with_uses(&[..])
///     .with_ignore_undefined_fields(..)
///     .with_construct_kind(..)
/// ```
fn class_info_expr(data: &DtoStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let info_ = crate::path::info_(dto_reflect_path);

    let slots = data.slots().map(|field| {
        let name = &field.name;
        let vis = field.vis.to_tokens_with(dto_reflect_path);
        let hint = field.hint.to_tokens_with(dto_reflect_path);
        quote!(#info_::SlotInfo::new(#name, #vis, #hint))
    });

    let getters = data.getters().into_iter().map(|(name, acc)| {
        let vis = acc.vis.to_tokens_with(dto_reflect_path);
        quote!(#info_::AccessorInfo::getter(#name, #vis))
    });
    let setters = data.setters().into_iter().map(|(name, acc, hint)| {
        let vis = acc.vis.to_tokens_with(dto_reflect_path);
        match hint {
            Some(hint) => {
                let hint = hint.to_tokens_with(dto_reflect_path);
                quote!(#info_::AccessorInfo::setter(#name, #vis).with_hint(#hint))
            }
            None => quote!(#info_::AccessorInfo::setter(#name, #vis)),
        }
    });

    let uses = data.uses_strings();
    let ignore = data.attrs().ignore_undefined_fields;
    let kind = match data.attrs().construct {
        ConstructAttribute::Hydrate => quote!(Hydrate),
        ConstructAttribute::Positional => quote!(Positional),
        ConstructAttribute::Mapping(_) => quote!(Mapping),
    };

    quote! {
        #info_::ClassInfo::new::<Self>(__TYPE_PATH, &[ #(#slots),* ])
            .with_accessors(&[ #(#getters,)* #(#setters),* ])
            .with_uses(&[ #(#uses),* ])
            .with_ignore_undefined_fields(#ignore)
            .with_construct_kind(#info_::ConstructKind::#kind)
    }
}

fn construct_body(data: &DtoStruct) -> TokenStream {
    let dto_reflect_path = data.dto_reflect_path();
    let macro_exports_ = crate::path::macro_exports_(dto_reflect_path);

    match &data.attrs().construct {
        ConstructAttribute::Hydrate => quote! {
            #macro_exports_::hydrate_default::<Self>(mapping)
        },
        ConstructAttribute::Mapping(path) => quote! {
            #path(mapping)
        },
        ConstructAttribute::Positional => {
            let inits = data.fields().iter().map(|field| {
                let member = field.member;
                if field.skip {
                    return quote!(#member: ::core::default::Default::default());
                }
                let ty = field.ty;
                let name = &field.name;
                quote! {
                    #member: #macro_exports_::positional::<#ty>(&mut values, class, #name)?
                }
            });

            quote! {
                #[allow(unused_variables)]
                let class = <Self as #dto_reflect_path::Dto>::class_info();
                #[allow(unused_mut, unused_variables)]
                let mut values = mapping.into_values();
                ::core::result::Result::Ok(Self { #(#inits),* })
            }
        }
    }
}
