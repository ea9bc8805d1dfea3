//! Query construction for the todo GraphQL grammar
//!
//! User input never gets concatenated into a query directly: an [`Intent`]
//! is turned into an abstract [`Operation`] (root field, typed arguments,
//! selection set) and serialized by [`Operation::encode`], which escapes
//! every string argument. For input without special characters the output
//! matches the wire grammar the todo backend expects:
//!
//! ```text
//! {todoList{id,text,done}}
//! mutation _{createTodo(text:"..."){id,text,done}}
//! mutation _{updateTodo(id:"...",done:true){id,text,done}}
//! ```

use crate::error::{ProtocolError, Result};
use std::fmt::Write;

/// Field set requested for every todo operation
pub const TODO_FIELDS: &[&str] = &["id", "text", "done"];

/// Operation name used for mutations
pub const MUTATION_NAME: &str = "_";

/// A desired todo operation, prior to serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Fetch the full collection
    List,
    /// Fetch a single record by id
    Get { id: String },
    /// Fetch the most recently added record
    Last,
    /// Create a record with the given text
    Create { text: String },
    /// Set the done flag of a record
    Update { id: String, done: bool },
}

impl Intent {
    /// Build a `Create` intent, rejecting blank text
    pub fn create(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Intent::Create { text })
    }

    /// Build an `Update` intent. Neither value is validated.
    pub fn update(id: impl Into<String>, done: bool) -> Self {
        Intent::Update {
            id: id.into(),
            done,
        }
    }

    /// Build a `Get` intent
    pub fn get(id: impl Into<String>) -> Self {
        Intent::Get { id: id.into() }
    }

    /// Root field the response payload is keyed under
    pub fn field(&self) -> &'static str {
        match self {
            Intent::List => "todoList",
            Intent::Get { .. } => "todo",
            Intent::Last => "lastTodo",
            Intent::Create { .. } => "createTodo",
            Intent::Update { .. } => "updateTodo",
        }
    }

    /// Whether the intent maps to a mutation
    pub fn is_mutation(&self) -> bool {
        matches!(self, Intent::Create { .. } | Intent::Update { .. })
    }

    /// Lower the intent into an abstract operation
    pub fn operation(&self) -> Result<Operation> {
        let op = match self {
            Intent::List | Intent::Last => Operation::query(self.field()),
            Intent::Get { id } => Operation::query(self.field()).arg("id", id.as_str()),
            Intent::Create { text } => {
                validate_text(text)?;
                Operation::mutation(self.field()).arg("text", text.as_str())
            }
            Intent::Update { id, done } => Operation::mutation(self.field())
                .arg("id", id.as_str())
                .arg("done", *done),
        };
        Ok(op.select(TODO_FIELDS))
    }

    /// Serialize the intent into a query string
    pub fn to_query(&self) -> Result<String> {
        Ok(self.operation()?.encode())
    }
}

fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ProtocolError::Validation(
            "Please specify a task".to_string(),
        ));
    }
    Ok(())
}

/// `{todoList{id,text,done}}`
pub fn build_list_query() -> String {
    Operation::query(Intent::List.field())
        .select(TODO_FIELDS)
        .encode()
}

/// `mutation _{createTodo(text:"<text>"){id,text,done}}`
pub fn build_create_query(text: &str) -> Result<String> {
    Intent::create(text)?.to_query()
}

/// `mutation _{updateTodo(id:"<id>",done:<bool>){id,text,done}}`
pub fn build_update_query(id: &str, done: bool) -> String {
    Operation::mutation("updateTodo")
        .arg("id", id)
        .arg("done", done)
        .select(TODO_FIELDS)
        .encode()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationKind {
    Query,
    Mutation,
}

/// Typed argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Encoded as a quoted, escaped string literal
    String(String),
    /// Encoded as the bare token `true` or `false`
    Boolean(bool),
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::String(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::String(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Argument::Boolean(value)
    }
}

/// Abstract single-field GraphQL operation
#[derive(Debug, Clone)]
pub struct Operation {
    kind: OperationKind,
    name: Option<String>,
    field: String,
    args: Vec<(String, Argument)>,
    selection: Vec<String>,
}

impl Operation {
    /// Start an anonymous query on `field`
    pub fn query(field: &str) -> Self {
        Self {
            kind: OperationKind::Query,
            name: None,
            field: field.to_string(),
            args: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Start a mutation on `field`, named [`MUTATION_NAME`]
    pub fn mutation(field: &str) -> Self {
        Self {
            kind: OperationKind::Mutation,
            name: Some(MUTATION_NAME.to_string()),
            field: field.to_string(),
            args: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Override the operation name
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Append an argument; order is preserved in the output
    pub fn arg<T: Into<Argument>>(mut self, name: &str, value: T) -> Self {
        self.args.push((name.to_string(), value.into()));
        self
    }

    /// Set the selection set
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.selection = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Root field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Arguments in insertion order
    pub fn args(&self) -> &[(String, Argument)] {
        &self.args
    }

    /// Serialize into the compact wire grammar
    pub fn encode(&self) -> String {
        let mut out = String::new();

        match (self.kind, &self.name) {
            (OperationKind::Mutation, Some(name)) => {
                out.push_str("mutation ");
                out.push_str(name);
            }
            (OperationKind::Mutation, None) => out.push_str("mutation"),
            (OperationKind::Query, Some(name)) => {
                out.push_str("query ");
                out.push_str(name);
            }
            (OperationKind::Query, None) => {}
        }

        out.push('{');
        out.push_str(&self.field);

        if !self.args.is_empty() {
            out.push('(');
            for (i, (name, value)) in self.args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(name);
                out.push(':');
                match value {
                    Argument::String(s) => {
                        out.push('"');
                        escape_into(&mut out, s);
                        out.push('"');
                    }
                    Argument::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
                }
            }
            out.push(')');
        }

        if !self.selection.is_empty() {
            out.push('{');
            out.push_str(&self.selection.join(","));
            out.push('}');
        }

        out.push('}');
        out
    }
}

/// Escape `value` as the body of a GraphQL string literal
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(&mut out, value);
    out
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if c.is_control() => {
                // Writing to a String cannot fail
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}
