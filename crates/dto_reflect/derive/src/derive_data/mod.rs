//! Parsing of the derive input and its `#[dto(..)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod dto_struct;
mod field_attributes;
mod type_attributes;
mod type_hint;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use dto_struct::{DtoField, DtoStruct};
pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::{ConstructAttribute, TypeAttributes};
pub(crate) use type_hint::HintExpr;

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::ParseStream;
use syn::{Ident, LitBool, Path, Token};

// -----------------------------------------------------------------------------
// Shared pieces

/// `vis = public | restricted | private`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VisAttribute {
    Public,
    Restricted,
    Private,
}

impl VisAttribute {
    pub fn parse(input: ParseStream) -> syn::Result<Self> {
        let ident: Ident = input.parse()?;
        match ident.to_string().as_str() {
            "public" => Ok(Self::Public),
            "restricted" => Ok(Self::Restricted),
            "private" => Ok(Self::Private),
            _ => Err(syn::Error::new(
                ident.span(),
                "expected `public`, `restricted` or `private`",
            )),
        }
    }

    /// Maps a Rust field visibility.
    pub fn from_syn(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => Self::Public,
            syn::Visibility::Restricted(restricted) if restricted.path.is_ident("self") => {
                Self::Private
            }
            syn::Visibility::Restricted(_) => Self::Restricted,
            syn::Visibility::Inherited => Self::Private,
        }
    }

    pub fn to_tokens_with(self, dto_reflect_path: &Path) -> TokenStream {
        let info_ = crate::path::info_(dto_reflect_path);
        match self {
            Self::Public => quote!(#info_::Visibility::Public),
            Self::Restricted => quote!(#info_::Visibility::Restricted),
            Self::Private => quote!(#info_::Visibility::Private),
        }
    }
}

/// A getter or setter function with its visibility.
#[derive(Debug, Clone)]
pub(crate) struct AccessorFn {
    pub path: Path,
    pub vis: VisAttribute,
}

impl AccessorFn {
    /// Parses the part after `get` / `set`: either `= path` or
    /// `(path, vis = ..)`.
    pub fn parse_after_key(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            return Ok(Self {
                path: input.parse()?,
                vis: VisAttribute::Public,
            });
        }

        let content;
        syn::parenthesized!(content in input);
        let path: Path = content.parse()?;
        let mut vis = VisAttribute::Public;
        if content.parse::<Option<Token![,]>>()?.is_some() && !content.is_empty() {
            let key: Ident = content.parse()?;
            if key != "vis" {
                return Err(syn::Error::new(key.span(), "expected `vis = ..`"));
            }
            content.parse::<Token![=]>()?;
            vis = VisAttribute::parse(&content)?;
            content.parse::<Option<Token![,]>>()?;
        }
        Ok(Self { path, vis })
    }
}

pub(crate) fn parse_bool(input: ParseStream) -> syn::Result<bool> {
    Ok(input.parse::<LitBool>()?.value)
}
