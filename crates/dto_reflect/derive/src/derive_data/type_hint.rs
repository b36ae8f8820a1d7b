use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, LitStr, Path, PathArguments, PathSegment, Type};

use crate::utils::path_to_string;

/// The `TypeHint` expression of a slot.
#[derive(Debug, Clone)]
pub(crate) enum HintExpr {
    /// `#[dto(hint = "..")]`, parsed at runtime.
    Declared(LitStr),
    /// Read off the field's Rust type.
    Derived { token: String, is_array: bool },
}

impl HintExpr {
    /// Reduces `ty` to an element token: `Option`, `Box`, `Rc` and `Arc` are
    /// peeled, `Vec`, `VecDeque`, arrays and slices mark a sequence.
    pub fn from_type(ty: &Type) -> Self {
        let (token, is_array) = reduce(ty);
        Self::Derived { token, is_array }
    }

    pub fn to_tokens_with(&self, dto_reflect_path: &Path) -> TokenStream {
        let info_ = crate::path::info_(dto_reflect_path);
        match self {
            Self::Declared(lit) => quote!(#info_::TypeHint::parse(#lit)),
            Self::Derived { token, is_array } => quote!(#info_::TypeHint::new(#token, #is_array)),
        }
    }
}

const UNTYPED: &str = "mixed";

fn reduce(ty: &Type) -> (String, bool) {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let Some(last) = type_path.path.segments.last() else {
                return (UNTYPED.into(), false);
            };
            match last.ident.to_string().as_str() {
                "Option" | "Box" | "Rc" | "Arc" => match first_type_arg(last) {
                    Some(inner) => reduce(inner),
                    None => (UNTYPED.into(), false),
                },
                "Vec" | "VecDeque" => match first_type_arg(last) {
                    Some(inner) => (element(inner), true),
                    None => (UNTYPED.into(), true),
                },
                _ => (path_to_string(&type_path.path), false),
            }
        }
        Type::Array(array) => (element(&array.elem), true),
        Type::Slice(slice) => (element(&slice.elem), true),
        Type::Reference(reference) => reduce(&reference.elem),
        Type::Paren(paren) => reduce(&paren.elem),
        Type::Group(group) => reduce(&group.elem),
        _ => (UNTYPED.into(), false),
    }
}

// Nested sequences are not coerced element-wise.
fn element(ty: &Type) -> String {
    match reduce(ty) {
        (_, true) => "array".into(),
        (token, false) => token,
    }
}

fn first_type_arg(segment: &PathSegment) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::HintExpr;

    fn derived(ty: &str) -> (String, bool) {
        let ty: syn::Type = syn::parse_str(ty).unwrap();
        match HintExpr::from_type(&ty) {
            HintExpr::Derived { token, is_array } => (token, is_array),
            HintExpr::Declared(_) => unreachable!(),
        }
    }

    #[test]
    fn peels_wrappers_and_sequences() {
        assert_eq!(derived("i64"), ("i64".into(), false));
        assert_eq!(derived("Option<ChildDto>"), ("ChildDto".into(), false));
        assert_eq!(derived("Vec<ChildDto>"), ("ChildDto".into(), true));
        assert_eq!(derived("Vec<Option<Box<ChildDto>>>"), ("ChildDto".into(), true));
        assert_eq!(derived("[crate::a::B; 3]"), ("crate::a::B".into(), true));
        assert_eq!(derived("Vec<Vec<i64>>"), ("array".into(), true));
        assert_eq!(derived("(i64, i64)"), ("mixed".into(), false));
    }
}
