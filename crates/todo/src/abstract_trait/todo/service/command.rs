use crate::domain::{
    requests::todo::{CreateTodoRequest, UpdateTodoRequest},
    response::todo::TodoResponse,
};
use anyhow::Result;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynTodoCommandService = Arc<dyn TodoCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait TodoCommandServiceTrait {
    async fn create(
        &self,
        req: &CreateTodoRequest,
    ) -> Result<ApiResponse<TodoResponse>, ServiceError>;
    async fn update(
        &self,
        req: &UpdateTodoRequest,
    ) -> Result<ApiResponse<TodoResponse>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<ApiResponse<bool>, ServiceError>;
}
