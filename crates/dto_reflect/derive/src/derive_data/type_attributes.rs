use convert_case::{Case, Casing};
use proc_macro2::Span;
use syn::{Attribute, Ident, LitStr, Path, Token, punctuated::Punctuated};

use super::{AccessorFn, VisAttribute, parse_bool};
use crate::DTO_ATTRIBUTE_NAME;

/// `rename_all = ".."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Camel,
    Pascal,
    Snake,
    Kebab,
    ScreamingSnake,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "snake_case" => Ok(Self::Snake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            _ => Err(syn::Error::new(
                lit.span(),
                "expected one of `camelCase`, `PascalCase`, `snake_case`, `kebab-case`, `SCREAMING_SNAKE_CASE`",
            )),
        }
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Camel => name.to_case(Case::Camel),
            Self::Pascal => name.to_case(Case::Pascal),
            Self::Snake => name.to_case(Case::Snake),
            Self::Kebab => name.to_case(Case::Kebab),
            Self::ScreamingSnake => name.to_case(Case::UpperSnake),
        }
    }
}

/// `construct = hydrate | positional | mapping(path)`.
#[derive(Debug, Clone, Default)]
pub(crate) enum ConstructAttribute {
    #[default]
    Hydrate,
    Positional,
    Mapping(Path),
}

/// `accessor(name = "..", get = .., set = .., vis = .., hint = "..")`.
///
/// Declares accessors for a field name without a stored slot.
#[derive(Debug, Clone)]
pub(crate) struct AccessorAttribute {
    pub name: LitStr,
    pub getter: Option<AccessorFn>,
    pub setter: Option<AccessorFn>,
    pub hint: Option<LitStr>,
}

/// Attributes on the type itself.
#[derive(Debug)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<LitStr>,
    pub rename_all: Option<RenameRule>,
    pub ignore_undefined_fields: bool,
    pub uses: Vec<Path>,
    pub construct: ConstructAttribute,
    pub accessors: Vec<AccessorAttribute>,
    /// `None` when disabled with `auto_register = false`.
    pub auto_register: Option<Span>,
    pub serde: bool,
}

impl Default for TypeAttributes {
    fn default() -> Self {
        Self {
            type_path: None,
            rename_all: None,
            ignore_undefined_fields: true,
            uses: Vec::new(),
            construct: ConstructAttribute::Hydrate,
            accessors: Vec::new(),
            auto_register: Some(Span::call_site()),
            serde: true,
        }
    }
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(DTO_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let Some(key) = meta.path.get_ident() else {
                    return Err(meta.error("unsupported `dto` attribute"));
                };
                match key.to_string().as_str() {
                    "type_path" => this.type_path = Some(meta.value()?.parse()?),
                    "rename_all" => {
                        this.rename_all = Some(RenameRule::parse(&meta.value()?.parse()?)?);
                    }
                    "ignore_undefined_fields" => {
                        this.ignore_undefined_fields = parse_bool(meta.value()?)?;
                    }
                    "uses" => {
                        let content;
                        syn::parenthesized!(content in meta.input);
                        let paths = Punctuated::<Path, Token![,]>::parse_terminated(&content)?;
                        this.uses.extend(paths);
                    }
                    "construct" => this.construct = parse_construct(meta.value()?)?,
                    "accessor" => {
                        let mut name = None;
                        let mut getter = None;
                        let mut setter = None;
                        let mut hint = None;
                        let mut vis = None;
                        meta.parse_nested_meta(|inner| {
                            if inner.path.is_ident("name") {
                                name = Some(inner.value()?.parse::<LitStr>()?);
                            } else if inner.path.is_ident("get") {
                                getter = Some(AccessorFn::parse_after_key(inner.input)?);
                            } else if inner.path.is_ident("set") {
                                setter = Some(AccessorFn::parse_after_key(inner.input)?);
                            } else if inner.path.is_ident("hint") {
                                hint = Some(inner.value()?.parse::<LitStr>()?);
                            } else if inner.path.is_ident("vis") {
                                vis = Some(VisAttribute::parse(inner.value()?)?);
                            } else {
                                return Err(inner.error("expected `name`, `get`, `set`, `vis` or `hint`"));
                            }
                            Ok(())
                        })?;

                        let name = name.ok_or_else(|| meta.error("`accessor` requires `name`"))?;
                        if getter.is_none() && setter.is_none() {
                            return Err(meta.error("`accessor` requires `get` or `set`"));
                        }
                        if let Some(vis) = vis {
                            for acc in [&mut getter, &mut setter].into_iter().flatten() {
                                acc.vis = vis;
                            }
                        }
                        this.accessors.push(AccessorAttribute {
                            name,
                            getter,
                            setter,
                            hint,
                        });
                    }
                    "auto_register" => {
                        this.auto_register = parse_bool(meta.value()?)?.then(|| key.span());
                    }
                    "serde" => this.serde = parse_bool(meta.value()?)?,
                    _ => return Err(meta.error("unsupported `dto` attribute")),
                }
                Ok(())
            })?;
        }

        Ok(this)
    }
}

fn parse_construct(input: syn::parse::ParseStream) -> syn::Result<ConstructAttribute> {
    let kind: Ident = input.parse()?;
    match kind.to_string().as_str() {
        "hydrate" => Ok(ConstructAttribute::Hydrate),
        "positional" => Ok(ConstructAttribute::Positional),
        "mapping" => {
            let content;
            syn::parenthesized!(content in input);
            Ok(ConstructAttribute::Mapping(content.parse()?))
        }
        _ => Err(syn::Error::new(
            kind.span(),
            "expected `hydrate`, `positional` or `mapping(path)`",
        )),
    }
}
