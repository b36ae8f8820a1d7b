use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use std::sync::{PoisonError, RwLock};

use dto_utils::TypeIdMap;
use dto_utils::hash::HashMap;

use crate::info::ClassInfo;
use crate::registry::ClassRegistry;

type TokenCache = HashMap<Box<str>, Option<&'static ClassInfo>>;

static RESOLVED: RwLock<TypeIdMap<TokenCache>> = RwLock::new(TypeIdMap::new());

/// Tokens that never name a DTO class.
const SCALAR_TOKENS: &[&str] = &[
    // Rust scalars and untyped containers
    "bool", "char", "str", "String", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize", "f32", "f64", "Value", "Mapping",
    // docblock hint words
    "string", "int", "integer", "float", "number", "double", "boolean", "array", "mixed", "null",
];

const STD_PREFIXES: &[&str] = &["std::", "core::", "alloc::"];

// -----------------------------------------------------------------------------
// TypeResolver

/// Resolves a declared type token to a registered DTO class.
///
/// Resolution is total: a token that does not lead to a registered class
/// resolves to `None`, which then means "store the raw value". Each result
/// is cached per `(declaring class, token)` and never recomputed.
///
/// # Resolution order
///
/// 1. Scalar tokens (`i64`, `String`, `Value`, `string`, `array`, ..) and
///    paths under `std::`, `core::` or `alloc::` resolve to `None`.
/// 2. `crate::`, `self::`, `super::` and a leading `::` are rewritten against
///    the declaring class's module path.
/// 3. A token containing `::` is taken as fully qualified.
/// 4. Otherwise `{module}::{token}` is tried, then the first `uses` entry
///    equal to the token or ending in `::{token}`. The first matching
///    import wins even if it names no registered class.
/// 5. The candidate must name a class in the registry.
///
/// # Examples
///
/// ```
/// use dto_reflect::{Dto, derive::Dto, registry::{ClassRegistry, TypeResolver}};
///
/// #[derive(Dto, Clone, Default)]
/// #[dto(type_path = "shop::cart::Line", auto_register = false)]
/// struct Line {
///     pub qty: i64,
/// }
///
/// #[derive(Dto, Clone, Default)]
/// #[dto(type_path = "shop::cart::Cart", auto_register = false)]
/// struct Cart {
///     pub lines: Vec<Line>,
/// }
///
/// let mut registry = ClassRegistry::empty();
/// registry.register::<Line>();
///
/// let cart = Cart::class_info();
/// let line = TypeResolver::resolve_in(&registry, cart, "Line").unwrap();
/// assert_eq!(line.type_path(), "shop::cart::Line");
/// assert!(TypeResolver::resolve_in(&registry, cart, "self::Line").is_some());
/// assert!(TypeResolver::resolve_in(&registry, cart, "String").is_none());
/// assert!(TypeResolver::resolve_in(&registry, cart, "Missing").is_none());
/// ```
pub struct TypeResolver;

impl TypeResolver {
    /// Resolves `token` as declared in `context` against
    /// [`ClassRegistry::global`], caching the result.
    pub fn resolve(context: &ClassInfo, token: &str) -> Option<&'static ClassInfo> {
        if is_scalar(token) {
            return None;
        }

        let type_id = context.type_id();
        if let Some(resolved) = RESOLVED
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .and_then(|tokens| tokens.get(token))
        {
            return *resolved;
        }

        let resolved = Self::resolve_in(&ClassRegistry::read_global(), context, token);

        let mut cache = RESOLVED.write().unwrap_or_else(PoisonError::into_inner);
        *cache
            .get_or_insert(type_id, TokenCache::default)
            .entry(token.into())
            .or_insert_with(|| {
                log::trace!(
                    "`{token}` in `{}` resolved to {:?}",
                    context.type_path(),
                    resolved.map(ClassInfo::type_path),
                );
                resolved
            })
    }

    /// Resolves `token` as declared in `context` against `registry`,
    /// without caching.
    pub fn resolve_in(
        registry: &ClassRegistry,
        context: &ClassInfo,
        token: &str,
    ) -> Option<&'static ClassInfo> {
        if is_scalar(token) {
            return None;
        }

        let module = context.module_path();
        let token = normalize(module, token);
        if is_scalar(&token) {
            return None;
        }

        let candidate: Cow<'_, str> = if token.contains("::") {
            token
        } else {
            let local = qualify(module, &token);
            if registry.get_with_type_path(&local).is_some() {
                Cow::Owned(local)
            } else {
                match find_import(context, &token) {
                    Some(path) => path,
                    None => {
                        log::debug!(
                            "type `{token}` in `{}` is neither local nor imported",
                            context.type_path(),
                        );
                        return None;
                    }
                }
            }
        };

        let resolved = registry.get_with_type_path(&candidate);
        if resolved.is_none() {
            log::debug!(
                "type `{candidate}` in `{}` is not a registered class",
                context.type_path(),
            );
        }
        resolved
    }
}

fn is_scalar(token: &str) -> bool {
    SCALAR_TOKENS.contains(&token) || STD_PREFIXES.iter().any(|p| token.starts_with(p))
}

fn qualify(module: &str, name: &str) -> String {
    if module.is_empty() {
        name.into()
    } else {
        format!("{module}::{name}")
    }
}

/// Rewrites `crate::`, `self::`, `super::` and a leading `::` against `module`.
fn normalize<'a>(module: &str, token: &'a str) -> Cow<'a, str> {
    if let Some(rest) = token.strip_prefix("::") {
        return Cow::Borrowed(rest);
    }
    if let Some(rest) = token.strip_prefix("crate::") {
        let root = module.split("::").next().unwrap_or(module);
        return Cow::Owned(qualify(root, rest));
    }
    if let Some(rest) = token.strip_prefix("self::") {
        return Cow::Owned(qualify(module, rest));
    }
    if token.starts_with("super::") {
        let mut base = module;
        let mut rest = token;
        while let Some(tail) = rest.strip_prefix("super::") {
            base = base.rsplit_once("::").map_or("", |(parent, _)| parent);
            rest = tail;
        }
        return Cow::Owned(qualify(base, rest));
    }
    Cow::Borrowed(token)
}

/// The first `uses` entry naming `token`, normalized.
fn find_import(context: &ClassInfo, token: &str) -> Option<Cow<'static, str>> {
    let path = context.uses().iter().copied().find(|path| {
        *path == token
            || path
                .strip_suffix(token)
                .is_some_and(|head| head.ends_with("::"))
    })?;
    Some(normalize(context.module_path(), path))
}

#[cfg(test)]
mod tests {
    use super::{TypeResolver, normalize};
    use crate::Dto;
    use crate::registry::ClassRegistry;
    use crate::tests::dtos::foo::FooDto;
    use crate::tests::dtos::{ChildDto, RootDto};

    #[test]
    fn normalizes_relative_prefixes() {
        assert_eq!(normalize("app::dtos", "crate::x::Foo"), "app::x::Foo");
        assert_eq!(normalize("app::dtos", "self::Foo"), "app::dtos::Foo");
        assert_eq!(normalize("app::dtos::deep", "super::super::Foo"), "app::Foo");
        assert_eq!(normalize("app::dtos", "::other::Foo"), "other::Foo");
        assert_eq!(normalize("app::dtos", "Foo"), "Foo");
    }

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::empty();
        registry.register::<ChildDto>();
        registry.register::<FooDto>();
        registry
    }

    #[test]
    fn resolves_through_module_and_imports() {
        let registry = registry();
        let root = RootDto::class_info();

        let local = TypeResolver::resolve_in(&registry, root, "ChildDto").unwrap();
        assert!(core::ptr::eq(local, ChildDto::class_info()));

        // `FooDto` lives in a child module and is reached through `uses`.
        let imported = TypeResolver::resolve_in(&registry, root, "FooDto").unwrap();
        assert!(core::ptr::eq(imported, FooDto::class_info()));

        let qualified = TypeResolver::resolve_in(&registry, root, FooDto::class_info().type_path());
        assert!(qualified.is_some());
    }

    #[test]
    fn scalars_and_unknown_tokens_do_not_resolve() {
        let registry = registry();
        let root = RootDto::class_info();
        for token in ["i64", "String", "Value", "array", "mixed", "std::string::String"] {
            assert!(TypeResolver::resolve_in(&registry, root, token).is_none(), "{token}");
        }
        assert!(TypeResolver::resolve_in(&registry, root, "Ghost").is_none());
        assert!(TypeResolver::resolve_in(&ClassRegistry::empty(), root, "ChildDto").is_none());
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn cached_results_are_stable() {
        let root = RootDto::class_info();
        let first = TypeResolver::resolve(root, "ChildDto");
        assert!(first.is_some());
        assert_eq!(
            first.map(|c| c.type_path()),
            TypeResolver::resolve(root, "ChildDto").map(|c| c.type_path())
        );

        assert!(TypeResolver::resolve(root, "NoSuchDto").is_none());
        // Registering afterwards does not revive a cached miss.
        ClassRegistry::write_global().register::<ChildDto>();
        assert!(TypeResolver::resolve(root, "NoSuchDto").is_none());
    }
}
