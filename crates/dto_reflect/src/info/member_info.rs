// -----------------------------------------------------------------------------
// Visibility

/// Who may access a slot or accessor.
///
/// `Restricted` covers `pub(crate)`, `pub(super)` and `pub(in ..)`; it is
/// accessible to the engine but not to external mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Restricted,
    Private,
}

impl Visibility {
    /// `Public` or `Restricted`.
    #[inline]
    pub const fn is_accessible(self) -> bool {
        matches!(self, Visibility::Public | Visibility::Restricted)
    }

    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

// -----------------------------------------------------------------------------
// TypeHint

/// The declared type of a field, reduced to a bare token.
///
/// `token` is the element type (`Option` and `Box` peeled, sequences
/// unwrapped) and `is_array` marks sequence-valued fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHint {
    token: &'static str,
    is_array: bool,
}

impl TypeHint {
    #[inline]
    pub const fn new(token: &'static str, is_array: bool) -> Self {
        Self { token, is_array }
    }

    /// Parses a docblock style hint such as `Foo`, `?Foo` or `Foo[]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dto_reflect::info::TypeHint;
    ///
    /// assert_eq!(TypeHint::parse("FooDto[]"), TypeHint::new("FooDto", true));
    /// assert_eq!(TypeHint::parse("?app::Child"), TypeHint::new("app::Child", false));
    /// ```
    pub fn parse(hint: &'static str) -> Self {
        let hint = hint.trim();
        let hint = hint.strip_prefix('?').unwrap_or(hint);
        match hint.strip_suffix("[]") {
            Some(token) => Self::new(token.trim(), true),
            None => Self::new(hint, false),
        }
    }

    #[inline]
    pub const fn token(&self) -> &'static str {
        self.token
    }

    #[inline]
    pub const fn is_array(&self) -> bool {
        self.is_array
    }
}

// -----------------------------------------------------------------------------
// SlotInfo

/// A stored field of a DTO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotInfo {
    name: &'static str,
    visibility: Visibility,
    hint: TypeHint,
}

impl SlotInfo {
    #[inline]
    pub const fn new(name: &'static str, visibility: Visibility, hint: TypeHint) -> Self {
        Self {
            name,
            visibility,
            hint,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn hint(&self) -> TypeHint {
        self.hint
    }
}

// -----------------------------------------------------------------------------
// AccessorInfo

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// A getter or setter declared for a field name.
///
/// The field need not have a slot: a getter without one is a virtual field.
/// A setter may carry its own hint for fields without a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorInfo {
    field: &'static str,
    kind: AccessorKind,
    visibility: Visibility,
    hint: Option<TypeHint>,
}

impl AccessorInfo {
    #[inline]
    pub const fn getter(field: &'static str, visibility: Visibility) -> Self {
        Self {
            field,
            kind: AccessorKind::Getter,
            visibility,
            hint: None,
        }
    }

    #[inline]
    pub const fn setter(field: &'static str, visibility: Visibility) -> Self {
        Self {
            field,
            kind: AccessorKind::Setter,
            visibility,
            hint: None,
        }
    }

    #[inline]
    pub const fn with_hint(mut self, hint: TypeHint) -> Self {
        self.hint = Some(hint);
        self
    }

    #[inline]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[inline]
    pub const fn kind(&self) -> AccessorKind {
        self.kind
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn hint(&self) -> Option<TypeHint> {
        self.hint
    }
}
