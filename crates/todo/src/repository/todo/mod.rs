mod command;
mod memory;
mod query;

use crate::abstract_trait::todo::repository::{DynTodoCommandRepository, DynTodoQueryRepository};
use shared::config::ConnectionPool;
use std::sync::Arc;

pub use self::command::TodoCommandRepository;
pub use self::memory::MemoryTodoRepository;
pub use self::query::TodoQueryRepository;

#[derive(Clone)]
pub struct TodoRepositories {
    pub query: DynTodoQueryRepository,
    pub command: DynTodoCommandRepository,
}

impl TodoRepositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            query: Arc::new(TodoQueryRepository::new(pool.clone())),
            command: Arc::new(TodoCommandRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        let store = MemoryTodoRepository::new();

        Self {
            query: Arc::new(store.clone()),
            command: Arc::new(store),
        }
    }
}
