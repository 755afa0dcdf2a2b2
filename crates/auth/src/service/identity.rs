use crate::{
    abstract_trait::{auth::IdentityServiceTrait, user::DynUserQueryRepository},
    domain::response::user::UserResponse,
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
pub struct IdentityService {
    query: DynUserQueryRepository,
    tracer: ServiceTracer,
}

impl IdentityService {
    pub async fn new(query: DynUserQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let tracer = ServiceTracer::new("identity_service", &registry).await;

        Self { query, tracer }
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("👤 Fetching profile for user ID: {user_id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "GetMe",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.query.find_by_id(user_id).await {
            Ok(Some(user)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Profile fetched")
                    .await;
                Ok(ApiResponse::success(
                    "User fetched successfully",
                    UserResponse::from(user),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "User not found")
                    .await;
                Err(ServiceError::NotFound("User not found".into()))
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to fetch user")
                    .await;
                Err(e.into())
            }
        }
    }
}
