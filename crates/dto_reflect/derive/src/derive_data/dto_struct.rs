use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Type};

use super::{AccessorFn, FieldAttributes, HintExpr, TypeAttributes, VisAttribute};
use crate::utils::unraw;

/// A stored field of the derived struct.
pub(crate) struct DtoField<'a> {
    pub member: &'a Ident,
    pub ty: &'a Type,
    /// The field name seen by the engine, after `rename` / `rename_all`.
    pub name: String,
    pub vis: VisAttribute,
    pub hint: HintExpr,
    pub getter: Option<AccessorFn>,
    pub setter: Option<AccessorFn>,
    pub skip: bool,
}

/// The parsed derive input.
pub(crate) struct DtoStruct<'a> {
    dto_reflect_path: Path,
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<DtoField<'a>>,
}

impl<'a> DtoStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "`Dto` cannot be derived for generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Some(named),
                Fields::Unit => None,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Dto` requires named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Dto` can only be derived for structs",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::new();
        for field in named.into_iter().flat_map(|named| named.named.iter()) {
            let Some(member) = field.ident.as_ref() else {
                continue;
            };
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if field_attrs.skip && field_attrs.has_non_skip() {
                return Err(syn::Error::new(
                    member.span(),
                    "`skip` cannot be combined with other `dto` attributes",
                ));
            }

            let name = match (&field_attrs.rename, attrs.rename_all) {
                (Some(lit), _) => lit.value(),
                (None, Some(rule)) => rule.apply(&unraw(member)),
                (None, None) => unraw(member),
            };
            let hint = match field_attrs.hint {
                Some(lit) => HintExpr::Declared(lit),
                None => HintExpr::from_type(&field.ty),
            };

            fields.push(DtoField {
                member,
                ty: &field.ty,
                name,
                vis: field_attrs
                    .vis
                    .unwrap_or_else(|| VisAttribute::from_syn(&field.vis)),
                hint,
                getter: field_attrs.getter,
                setter: field_attrs.setter,
                skip: field_attrs.skip,
            });
        }

        let this = Self {
            dto_reflect_path: crate::path::dto_reflect(),
            ident: &ast.ident,
            attrs,
            fields,
        };
        this.check_names()?;
        Ok(this)
    }

    fn check_names(&self) -> syn::Result<()> {
        let mut seen: Vec<&str> = Vec::new();
        for field in self.slots() {
            if seen.contains(&field.name.as_str()) {
                return Err(syn::Error::new(
                    field.member.span(),
                    format!("duplicate field name `{}`", field.name),
                ));
            }
            seen.push(&field.name);
        }
        for accessor in &self.attrs.accessors {
            let name = accessor.name.value();
            if seen.contains(&name.as_str()) {
                return Err(syn::Error::new(
                    accessor.name.span(),
                    format!("`{name}` already has field accessors"),
                ));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn dto_reflect_path(&self) -> &Path {
        &self.dto_reflect_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    /// Every field in declaration order, skipped ones included.
    #[inline]
    pub fn fields(&self) -> &[DtoField<'a>] {
        &self.fields
    }

    /// Fields that become slots.
    pub fn slots(&self) -> impl Iterator<Item = &DtoField<'a>> {
        self.fields.iter().filter(|field| !field.skip)
    }

    /// `(field name, getter)` pairs, type-level accessors first.
    pub fn getters(&self) -> Vec<(LitStr, &AccessorFn)> {
        let declared = self
            .attrs
            .accessors
            .iter()
            .filter_map(|acc| Some((acc.name.clone(), acc.getter.as_ref()?)));
        let on_fields = self.slots().filter_map(|field| {
            Some((
                LitStr::new(&field.name, field.member.span()),
                field.getter.as_ref()?,
            ))
        });
        declared.chain(on_fields).collect()
    }

    /// `(field name, setter, hint)` triples, type-level accessors first.
    pub fn setters(&self) -> Vec<(LitStr, &AccessorFn, Option<HintExpr>)> {
        let declared = self.attrs.accessors.iter().filter_map(|acc| {
            Some((
                acc.name.clone(),
                acc.setter.as_ref()?,
                acc.hint.clone().map(HintExpr::Declared),
            ))
        });
        let on_fields = self.slots().filter_map(|field| {
            Some((
                LitStr::new(&field.name, field.member.span()),
                field.setter.as_ref()?,
                Some(field.hint.clone()),
            ))
        });
        declared.chain(on_fields).collect()
    }

    /// The `&'static str` expression of the type path.
    pub fn type_path_expr(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => quote!(#lit),
            None => {
                let name = LitStr::new(&self.ident.to_string(), Span::call_site());
                quote!(::core::concat!(::core::module_path!(), "::", #name))
            }
        }
    }

    /// `uses` entries as strings, e.g. `"crate::dto::Child"`.
    pub fn uses_strings(&self) -> Vec<String> {
        self.attrs
            .uses
            .iter()
            .map(crate::utils::path_to_string)
            .collect()
    }
}
