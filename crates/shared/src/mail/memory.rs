use crate::{
    abstract_trait::EmailServiceTrait, domain::requests::EmailRequest, errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps every message in an in-process outbox. Used by the test-suite.
#[derive(Clone, Default)]
pub struct MemoryEmailService {
    outbox: Arc<Mutex<Vec<EmailRequest>>>,
}

impl MemoryEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn outbox(&self) -> Vec<EmailRequest> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl EmailServiceTrait for MemoryEmailService {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        self.outbox.lock().await.push(req.clone());
        Ok(())
    }
}
