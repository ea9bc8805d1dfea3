//! Root mutation type

use super::store::TodoStore;
use super::types::Todo;
use async_graphql::{Context, Object, Result as GQLResult};
use std::sync::Arc;

/// Root mutation type for GraphQL
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create new todo
    async fn create_todo(&self, ctx: &Context<'_>, text: String) -> GQLResult<Todo> {
        let store = ctx.data::<Arc<TodoStore>>()?;
        let todo = store.create(text);
        tracing::debug!(id = %todo.id, "todo created");
        Ok(todo)
    }

    /// Update existing todo, mark it done or not done
    async fn update_todo(
        &self,
        ctx: &Context<'_>,
        id: String,
        done: Option<bool>,
    ) -> GQLResult<Option<Todo>> {
        let store = ctx.data::<Arc<TodoStore>>()?;
        let updated = store.update(&id, done.unwrap_or(false));
        if updated.is_none() {
            tracing::debug!(id = %id, "updateTodo on unknown id");
        }
        Ok(updated)
    }
}
