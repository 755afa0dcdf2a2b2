use crate::{domain::requests::user::CreateUserRequest, model::user::User as UserModel};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError>;
    async fn update_is_email_verified(
        &self,
        user_id: i32,
        is_email_verified: bool,
    ) -> Result<UserModel, RepositoryError>;
}
