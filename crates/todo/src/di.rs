use crate::{
    abstract_trait::todo::service::{DynTodoCommandService, DynTodoQueryService},
    repository::todo::TodoRepositories,
    service::{command::TodoCommandService, query::TodoQueryService},
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub todo_query: DynTodoQueryService,
    pub todo_command: DynTodoCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("todo_query", &"TodoQueryService")
            .field("todo_command", &"TodoCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(repositories: TodoRepositories, registry: Arc<Mutex<Registry>>) -> Self {
        let todo_query = Arc::new(TodoQueryService::new(repositories.query, registry.clone()).await)
            as DynTodoQueryService;

        let todo_command =
            Arc::new(TodoCommandService::new(repositories.command, registry).await)
                as DynTodoCommandService;

        Self {
            todo_query,
            todo_command,
        }
    }
}
