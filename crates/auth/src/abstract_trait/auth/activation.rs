use crate::{domain::response::user::UserResponse, model::user::User};
use anyhow::Result;
use async_trait::async_trait;
use shared::{domain::responses::ApiResponse, errors::ServiceError, mail::DeliveryReceipt};
use std::sync::Arc;

pub type DynActivationService = Arc<dyn ActivationServiceTrait + Send + Sync>;

#[async_trait]
pub trait ActivationServiceTrait {
    /// Queues the activation email for `user`. Does not wait for delivery.
    async fn issue(&self, user: &User) -> Result<DeliveryReceipt, ServiceError>;

    /// Any failure along the way is reported as [`ServiceError::ActivationFailed`].
    async fn activate(
        &self,
        uidb64: &str,
        token: &str,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
