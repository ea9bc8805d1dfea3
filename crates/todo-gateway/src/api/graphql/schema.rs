//! Root query type

use super::store::TodoStore;
use super::types::Todo;
use async_graphql::{Context, Object, Result as GQLResult};
use std::sync::Arc;

/// Root query type for GraphQL
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Get single todo
    async fn todo(&self, ctx: &Context<'_>, id: Option<String>) -> GQLResult<Option<Todo>> {
        let store = ctx.data::<Arc<TodoStore>>()?;
        Ok(id.and_then(|id| store.get(&id)))
    }

    /// Last todo added
    async fn last_todo(&self, ctx: &Context<'_>) -> GQLResult<Option<Todo>> {
        let store = ctx.data::<Arc<TodoStore>>()?;
        Ok(store.last())
    }

    /// List of todos
    async fn todo_list(&self, ctx: &Context<'_>) -> GQLResult<Vec<Todo>> {
        let store = ctx.data::<Arc<TodoStore>>()?;
        Ok(store.list())
    }
}
