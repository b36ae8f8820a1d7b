use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::derive::Dto;
use crate::error::{DtoError, ValueError};
use crate::value::{FromValue, Mapping, Value};

pub(crate) mod foo;

use foo::FooDto;

// -----------------------------------------------------------------------------
// Shared fixtures

#[derive(Dto, Clone, Debug, Default, PartialEq)]
pub struct ChildDto {
    pub id: i64,
    #[dto(set(ChildDto::set_name, vis = restricted))]
    pub name: Option<String>,
}

impl ChildDto {
    pub(crate) fn set_name(&mut self, name: Option<String>) {
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            self.name = Some(format!("{name}Foo"));
        }
    }
}

#[derive(Dto, Clone, Debug, Default, PartialEq)]
pub struct CounterDto {
    pub hits: u64,
    pub slots: Vec<usize>,
}

#[derive(Dto, Clone, Debug, Default)]
#[dto(rename_all = "camelCase", uses(crate::tests::dtos::foo::FooDto))]
pub struct RootDto {
    pub id: i64,
    pub first_name: String,
    #[dto(get = RootDto::last_name, set(RootDto::set_last_name, vis = restricted))]
    last_name: String,
    pub(crate) patronymic: String,
    pub data: Value,
    pub child: ChildDto,
    pub sub_child: Option<ChildDto>,
    pub children: Vec<ChildDto>,
    pub foo: Vec<FooDto>,
    #[dto(hint = "crate::tests::dtos::foo::FooDto[]")]
    pub foo_bar: Value,
    pub readonly: Option<ReadonlyDto>,
    pub readonly_arr: Vec<ReadonlyDto>,
}

impl RootDto {
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub(crate) fn set_last_name(&mut self, last_name: String) {
        self.last_name = last_name;
    }
}

#[derive(Dto, Clone, Debug, Default)]
pub struct ReadWriteDto {
    pub(crate) id: i64,
    #[dto(set = ReadWriteDto::set_firstname)]
    pub(crate) firstname: String,
    #[dto(set(ReadWriteDto::set_lastname, vis = restricted))]
    pub(crate) lastname: String,
}

impl ReadWriteDto {
    pub fn set_firstname(&mut self, firstname: String) {
        self.firstname = firstname;
    }

    pub(crate) fn set_lastname(&mut self, lastname: String) {
        self.lastname = format!("{lastname} jr.");
    }
}

/// Filled positionally: values must arrive in declaration order.
#[derive(Dto, Clone, Debug, PartialEq)]
#[dto(construct = positional)]
pub struct ReadonlyDto {
    pub foo: String,
    pub bar: String,
}

#[derive(Dto, Clone, Debug, Default)]
#[dto(ignore_undefined_fields = false)]
pub struct StrictDto {
    pub(crate) id: i64,
}

#[derive(Dto, Clone, Debug, Default)]
pub struct EmptyDto;

// -----------------------------------------------------------------------------
// Accessor fixtures

/// A virtual getter, a public suffixing setter and fields left out of the
/// field list.
#[derive(Dto, Clone, Debug, Default)]
#[dto(accessor(name = "fullName", get = PersonDto::full_name))]
pub struct PersonDto {
    pub first: String,
    pub last: String,
    #[dto(set = PersonDto::set_title)]
    pub title: String,
    pub _cache: Option<String>,
    secret: String,
    #[dto(skip)]
    pub scratch: Vec<i64>,
}

impl PersonDto {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    pub fn set_title(&mut self, title: String) {
        self.title = format!("{title}.");
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Takes the whole mapping; keys other than `tag` are kept in `extra`.
#[derive(Dto, Clone, Debug)]
#[dto(construct = mapping(TaggedDto::from_raw))]
pub struct TaggedDto {
    pub tag: String,
    pub extra: Mapping,
}

impl TaggedDto {
    fn from_raw(mut mapping: Mapping) -> Result<Self, DtoError> {
        let tag = match mapping.remove("tag") {
            Some(value) => String::from_value(value)
                .map_err(|err| DtoError::invalid_value("TaggedDto", "tag", err))?,
            None => String::new(),
        };
        Ok(Self {
            tag,
            extra: mapping,
        })
    }
}

/// Untyped storage with declared hints, one of which names no class.
#[derive(Dto, Clone, Debug, Default)]
pub struct LooseDto {
    #[dto(hint = "GhostDto[]")]
    pub ghosts: Value,
    #[dto(hint = "?ChildDto")]
    pub child: Value,
    #[dto(hint = "ChildDto[]")]
    pub children: Value,
}

/// A setter with a fallible conversion.
#[derive(Dto, Clone, Debug, Default)]
pub struct PortDto {
    #[dto(set = PortDto::set_port)]
    pub port: i64,
}

impl PortDto {
    pub fn set_port(&mut self, port: i64) -> Result<(), ValueError> {
        if port == 0 {
            return Err(ValueError::OutOfRange { expected: "non-zero port" });
        }
        self.port = port;
        Ok(())
    }
}
