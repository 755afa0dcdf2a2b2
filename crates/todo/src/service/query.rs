use crate::{
    abstract_trait::todo::{repository::DynTodoQueryRepository, service::TodoQueryServiceTrait},
    domain::{
        requests::todo::FindAllTodos,
        response::todo::{TodoListResponse, TodoResponse},
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct TodoQueryService {
    query: DynTodoQueryRepository,
    tracer: ServiceTracer,
}

impl TodoQueryService {
    pub async fn new(query: DynTodoQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let tracer = ServiceTracer::new("todo_query_service", &registry).await;

        Self { query, tracer }
    }
}

#[async_trait]
impl TodoQueryServiceTrait for TodoQueryService {
    async fn find_all(
        &self,
        req: &FindAllTodos,
    ) -> Result<ApiResponse<TodoListResponse>, ServiceError> {
        let filter = req.filter();

        info!("📋 Listing todos, filter: {}", filter.as_str());

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindAllTodos",
            vec![
                KeyValue::new("component", "todo"),
                KeyValue::new("todo.filter", filter.as_str()),
            ],
        );

        let listing = async {
            let todos = self.query.find_all(filter).await?;
            let counts = self.query.count_by_status().await?;
            Ok::<_, ServiceError>((todos, counts))
        };

        let (todos, counts) = match listing.await {
            Ok(result) => result,
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to list todos")
                    .await;
                return Err(e);
            }
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Todos listed")
            .await;

        Ok(ApiResponse::success(
            "Todos fetched successfully",
            TodoListResponse {
                filter: filter.as_str().to_string(),
                todos: todos.into_iter().map(TodoResponse::from).collect(),
                all_count: counts.all_count,
                completed_count: counts.completed_count,
                incomplete_count: counts.incomplete_count,
            },
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<TodoResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindTodoById",
            vec![
                KeyValue::new("component", "todo"),
                KeyValue::new("todo.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(todo)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Todo fetched")
                    .await;
                Ok(ApiResponse::success(
                    "Todo fetched successfully",
                    TodoResponse::from(todo),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Todo not found")
                    .await;
                Err(ServiceError::NotFound("Todo not found".into()))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to fetch todo")
                    .await;
                Err(e.into())
            }
        }
    }
}
