use crate::{
    domain::requests::todo::{CreateTodoRequest, UpdateTodoRequest},
    model::todo::Todo as TodoModel,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynTodoCommandRepository = Arc<dyn TodoCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TodoCommandRepositoryTrait {
    async fn create_todo(&self, req: &CreateTodoRequest) -> Result<TodoModel, RepositoryError>;
    /// `RepositoryError::NotFound` when the todo does not exist.
    async fn update_todo(&self, req: &UpdateTodoRequest) -> Result<TodoModel, RepositoryError>;
    async fn delete_todo(&self, id: i32) -> Result<(), RepositoryError>;
}
