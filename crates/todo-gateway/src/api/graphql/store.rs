//! In-memory todo store behind the embedded schema

use super::types::Todo;
use parking_lot::RwLock;
use rand::Rng;

const ID_LEN: usize = 8;
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordered todo list; insertion order is list order
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl TodoStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the three demo todos `a`, `b` and `c`
    pub fn seeded() -> Self {
        Self {
            todos: RwLock::new(vec![
                Todo::new("a", "A todo not to forget", false),
                Todo::new("b", "This is the most important", false),
                Todo::new("c", "Please do this or else", false),
            ]),
        }
    }

    pub fn list(&self) -> Vec<Todo> {
        self.todos.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Todo> {
        self.todos.read().iter().find(|t| t.id == id).cloned()
    }

    pub fn last(&self) -> Option<Todo> {
        self.todos.read().last().cloned()
    }

    /// Append a new, not-done todo under a fresh random id
    pub fn create(&self, text: String) -> Todo {
        let mut todos = self.todos.write();
        let id = loop {
            let candidate = random_id();
            if !todos.iter().any(|t| t.id == candidate) {
                break candidate;
            }
        };
        let todo = Todo::new(id, text, false);
        todos.push(todo.clone());
        todo
    }

    /// Set the done flag; `None` for unknown ids
    pub fn update(&self, id: &str, done: bool) -> Option<Todo> {
        let mut todos = self.todos.write();
        let todo = todos.iter_mut().find(|t| t.id == id)?;
        todo.done = done;
        Some(todo.clone())
    }
}

fn random_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
