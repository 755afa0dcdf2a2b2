use crate::domain::{requests::auth::LoginRequest, response::token::TokenResponse};
use anyhow::Result;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError};
use std::sync::Arc;

pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError>;
}
