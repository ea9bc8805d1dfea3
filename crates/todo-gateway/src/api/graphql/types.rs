//! GraphQL type definitions

use async_graphql::SimpleObject;

/// A todo item
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub done: bool,
}

impl Todo {
    pub fn new(id: impl Into<String>, text: impl Into<String>, done: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done,
        }
    }
}
