use crate::derive::Dto;

/// Lives in a child module; `RootDto` reaches it through `uses`.
#[derive(Dto, Clone, Debug, Default, PartialEq)]
pub struct FooDto {
    pub id: i64,
}
