use crate::{domain::requests::EmailRequest, errors::ServiceError, mail::DeliveryReceipt};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMailDispatcher = Arc<dyn MailDispatcherTrait + Send + Sync>;

/// Hands an email to background delivery without waiting for the transport.
#[async_trait]
pub trait MailDispatcherTrait {
    async fn dispatch(&self, req: EmailRequest) -> Result<DeliveryReceipt, ServiceError>;
}
