//! Data models shared by the todo client and server

use serde::{Deserialize, Serialize};

/// A todo item as returned by the GraphQL API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Server-assigned opaque identifier
    pub id: String,
    /// Free-form task text
    pub text: String,
    /// Completion flag
    pub done: bool,
}

impl TodoRecord {
    /// Create a new record
    pub fn new(id: impl Into<String>, text: impl Into<String>, done: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done,
        }
    }
}

/// Decoded payload of a single operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Collection result (`todoList`)
    List(Vec<TodoRecord>),
    /// Single record result (`createTodo`, `updateTodo`, `todo`, `lastTodo`)
    Record(TodoRecord),
    /// The field resolved to `null`
    Null,
}

impl Payload {
    /// Consume into a list, treating a single record as a one-element list
    pub fn into_records(self) -> Vec<TodoRecord> {
        match self {
            Payload::List(records) => records,
            Payload::Record(record) => vec![record],
            Payload::Null => Vec::new(),
        }
    }
}
