mod command;
mod memory;
mod query;

use crate::abstract_trait::user::{DynUserCommandRepository, DynUserQueryRepository};
use shared::config::ConnectionPool;
use std::sync::Arc;

pub use self::command::UserCommandRepository;
pub use self::memory::MemoryUserRepository;
pub use self::query::UserQueryRepository;

#[derive(Clone)]
pub struct UserRepositories {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
}

impl UserRepositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            query: Arc::new(UserQueryRepository::new(pool.clone())),
            command: Arc::new(UserCommandRepository::new(pool)),
        }
    }

    /// Both halves share one in-process table.
    pub fn memory() -> Self {
        let store = MemoryUserRepository::new();

        Self {
            query: Arc::new(store.clone()),
            command: Arc::new(store),
        }
    }
}
