use crate::{
    abstract_trait::EmailServiceTrait, domain::requests::EmailRequest, errors::ServiceError,
    utils::render_email,
};
use async_trait::async_trait;
use tracing::info;

/// Development mailer: renders the message and logs it.
#[derive(Clone)]
pub struct LogEmailService {
    from: String,
}

impl LogEmailService {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl EmailServiceTrait for LogEmailService {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        let body = render_email(&req.data)
            .map_err(|e| ServiceError::Mail(format!("Failed to render email template: {e}")))?;

        info!(
            from = %self.from,
            to = %req.to,
            subject = %req.subject,
            link = %req.data.link,
            "📨 Email not sent (log backend), {} bytes rendered",
            body.len()
        );

        Ok(())
    }
}
