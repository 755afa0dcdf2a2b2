use crate::{
    abstract_trait::todo::{
        repository::DynTodoCommandRepository, service::TodoCommandServiceTrait,
    },
    domain::{
        requests::todo::{CreateTodoRequest, UpdateTodoRequest},
        response::todo::TodoResponse,
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct TodoCommandService {
    command: DynTodoCommandRepository,
    tracer: ServiceTracer,
}

impl TodoCommandService {
    pub async fn new(command: DynTodoCommandRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let tracer = ServiceTracer::new("todo_command_service", &registry).await;

        Self { command, tracer }
    }
}

fn not_found_as_service(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound("Todo not found".into()),
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl TodoCommandServiceTrait for TodoCommandService {
    async fn create(
        &self,
        req: &CreateTodoRequest,
    ) -> Result<ApiResponse<TodoResponse>, ServiceError> {
        info!("🆕 Creating todo: {}", req.title);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreateTodo",
            vec![
                KeyValue::new("component", "todo"),
                KeyValue::new("todo.title", req.title.clone()),
            ],
        );

        match self.command.create_todo(req).await {
            Ok(todo) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Todo created")
                    .await;
                Ok(ApiResponse::success(
                    "Todo created successfully",
                    TodoResponse::from(todo),
                ))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create todo")
                    .await;
                Err(e.into())
            }
        }
    }

    async fn update(
        &self,
        req: &UpdateTodoRequest,
    ) -> Result<ApiResponse<TodoResponse>, ServiceError> {
        info!("✏️ Updating todo ID: {}", req.todo_id);

        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateTodo",
            vec![
                KeyValue::new("component", "todo"),
                KeyValue::new("todo.id", req.todo_id.to_string()),
            ],
        );

        match self.command.update_todo(req).await {
            Ok(todo) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Todo updated")
                    .await;
                Ok(ApiResponse::success(
                    "Todo updated successfully",
                    TodoResponse::from(todo),
                ))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to update todo")
                    .await;
                Err(not_found_as_service(e))
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<bool>, ServiceError> {
        info!("🗑️ Deleting todo ID: {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteTodo",
            vec![
                KeyValue::new("component", "todo"),
                KeyValue::new("todo.id", id.to_string()),
            ],
        );

        match self.command.delete_todo(id).await {
            Ok(()) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Todo deleted")
                    .await;
                Ok(ApiResponse::success("Todo deleted successfully", true))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to delete todo")
                    .await;
                Err(not_found_as_service(e))
            }
        }
    }
}
