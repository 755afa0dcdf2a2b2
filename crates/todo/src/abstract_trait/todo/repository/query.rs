use crate::{
    domain::{requests::todo::TodoFilter, response::todo::TodoCounts},
    model::todo::Todo as TodoModel,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynTodoQueryRepository = Arc<dyn TodoQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TodoQueryRepositoryTrait {
    /// Oldest first.
    async fn find_all(&self, filter: TodoFilter) -> Result<Vec<TodoModel>, RepositoryError>;
    async fn count_by_status(&self) -> Result<TodoCounts, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<TodoModel>, RepositoryError>;
}
