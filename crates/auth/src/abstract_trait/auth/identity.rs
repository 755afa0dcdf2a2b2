use crate::domain::response::user::UserResponse;
use anyhow::Result;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;

#[async_trait]
pub trait IdentityServiceTrait {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
