//! See following macros:
//!
//! - [`Dto`]
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static DTO_ATTRIBUTE_NAME: &str = "dto";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # DTO Derivation
///
/// `#[derive(Dto)]` implements the following traits for a struct with named
/// fields (or a unit struct):
///
/// - `DynDto`
/// - `Dto`
/// - `FromValue`
/// - `ToValue`
/// - `serde::Serialize` and `serde::Deserialize`, unless `serde = false`
///
/// The type must also implement `Clone`, and `Default` when it uses the
/// default `hydrate` construction path. Generic types are not supported.
///
/// ## Type Attributes
///
/// ```ignore
/// #[derive(Dto, Clone, Default)]
/// #[dto(
///     type_path = "app::dto::Root",          // default: module_path!() + type name
///     rename_all = "camelCase",              // also snake_case, PascalCase, kebab-case, SCREAMING_SNAKE_CASE
///     ignore_undefined_fields = false,       // default: true
///     uses(crate::dto::child::ChildDto),     // imports for unqualified hints
///     construct = positional,                // hydrate (default) | positional | mapping(path)
///     accessor(name = "fullName", get = Root::full_name),
///     auto_register = false,                 // default: true
///     serde = false,                         // default: true
/// )]
/// struct Root { /* ... */ }
/// ```
///
/// - `construct = mapping(path)` calls `path(Mapping) -> Result<Self, DtoError>`.
/// - `construct = positional` fills the fields in declaration order from the
///   mapping's values in the mapping's order.
/// - `accessor(..)` declares a getter and/or setter for a field name that has
///   no stored slot. It accepts `name`, `get`, `set`, `vis` and `hint`.
///
/// ## Field Attributes
///
/// ```ignore
/// struct Root {
///     #[dto(rename = "ID")]
///     pub id: i64,
///     #[dto(get = Root::last_name, set(Root::set_last_name, vis = restricted))]
///     last_name: String,
///     #[dto(hint = "ChildDto[]")]
///     pub children: Value,
///     #[dto(vis = private)]
///     pub cache: Value,
///     #[dto(skip)]
///     pub scratch: String,
/// }
/// ```
///
/// - `get`: `fn(&Self) -> impl ToValue`.
/// - `set`: `fn(&mut Self, impl FromValue)` returning `()`,
///   `Result<(), DtoError>` or `Result<(), ValueError>`.
/// - Accessors are `public` unless `vis` says otherwise.
/// - A field's visibility comes from its Rust visibility: `pub` is public,
///   `pub(crate)`/`pub(super)`/`pub(in ..)` are restricted, anything else is
///   private. `vis` overrides it.
/// - `skip` leaves the field out of the class entirely; construction fills it
///   with `Default::default()`.
#[proc_macro_derive(Dto, attributes(dto))]
pub fn derive_dto(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::DtoStruct::from_ast(&ast) {
        Ok(data) => impls::impl_dto(&data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Submits an existing `Dto` type for automatic registration.
///
/// Used for types derived with `auto_register = false`, or whose `Dto`
/// impl is written by hand.
///
/// Expands to nothing when the `auto_register` feature is disabled.
///
/// ```ignore
/// impl_auto_register!(crate::dto::Root);
/// ```
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        let type_path = syn::parse_macro_input!(_input as syn::Type);

        let dto_reflect_path = path::dto_reflect();
        let auto_register_ = path::auto_register_(&dto_reflect_path);

        TokenStream::from(quote::quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#type_path as #auto_register_::__RegisterClass>::__register
                    )
                }
            };
        })
    }
}
