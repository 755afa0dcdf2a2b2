use crate::domain::{
    requests::todo::FindAllTodos,
    response::todo::{TodoListResponse, TodoResponse},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynTodoQueryService = Arc<dyn TodoQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait TodoQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllTodos,
    ) -> Result<ApiResponse<TodoListResponse>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<TodoResponse>, ServiceError>;
}
