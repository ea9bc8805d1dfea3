//! Todo protocol - query grammar and transport for the todo GraphQL API
//!
//! Provides:
//! - [`query`] - intents and the escaping-aware encoder for the todo grammar
//! - [`transport`] - the [`Transport`] seam, an HTTP implementation and the
//!   typed [`TodoClient`] on top of it
//! - [`model`] - the todo record shared by client and server
//!
//! # Example
//!
//! ```no_run
//! use todo_protocol::{HttpTransport, TodoClient};
//!
//! # async fn run() -> todo_protocol::Result<()> {
//! let client = TodoClient::new(HttpTransport::new("http://localhost:8080")?);
//! for todo in client.list().await? {
//!     println!("{} {}", todo.id, todo.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod query;
pub mod transport;

pub use error::{ProtocolError, Result};
pub use model::{Payload, TodoRecord};
pub use query::{Intent, Operation, build_create_query, build_list_query, build_update_query};
pub use transport::{ClientConfig, HttpTransport, TodoClient, Transport};
