use syn::{Attribute, LitStr};

use super::{AccessorFn, VisAttribute};
use crate::DTO_ATTRIBUTE_NAME;

/// Attributes on a struct field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub hint: Option<LitStr>,
    pub getter: Option<AccessorFn>,
    pub setter: Option<AccessorFn>,
    pub vis: Option<VisAttribute>,
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(DTO_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("hint") {
                    this.hint = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("get") {
                    this.getter = Some(AccessorFn::parse_after_key(meta.input)?);
                } else if meta.path.is_ident("set") {
                    this.setter = Some(AccessorFn::parse_after_key(meta.input)?);
                } else if meta.path.is_ident("vis") {
                    this.vis = Some(VisAttribute::parse(meta.value()?)?);
                } else if meta.path.is_ident("skip") {
                    this.skip = true;
                } else {
                    return Err(meta.error("unsupported `dto` field attribute"));
                }
                Ok(())
            })?;
        }

        Ok(this)
    }

    /// Whether anything besides `skip` was given.
    pub fn has_non_skip(&self) -> bool {
        self.rename.is_some()
            || self.hint.is_some()
            || self.getter.is_some()
            || self.setter.is_some()
            || self.vis.is_some()
    }
}
