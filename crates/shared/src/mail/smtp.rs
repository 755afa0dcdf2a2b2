use crate::{
    abstract_trait::EmailServiceTrait, config::SmtpConfig, domain::requests::EmailRequest,
    errors::ServiceError, utils::render_email,
};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

#[derive(Clone)]
pub struct SmtpEmailService {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpEmailService {
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self, ServiceError> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = SmtpTransport::starttls_relay(&config.smtp_server)
            .map_err(|e| ServiceError::Mail(format!("Failed to create SMTP relay: {e}")))?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = from
            .parse()
            .map_err(|e| ServiceError::Mail(format!("Invalid sender email '{from}': {e}")))?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl EmailServiceTrait for SmtpEmailService {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        let body = render_email(&req.data)
            .map_err(|e| ServiceError::Mail(format!("Failed to render email template: {e}")))?;

        let to: Mailbox = req.to.parse().map_err(|e| {
            error!("❌ Invalid recipient email: {}", e);
            ServiceError::Mail(format!("Invalid recipient email: {e}"))
        })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&req.subject)
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| ServiceError::Mail(format!("Failed to build email: {e}")))?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!("✅ Email sent to {}", req.to);
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to send email to {}: {}", req.to, e);
                Err(ServiceError::Mail(format!("Failed to send email: {e}")))
            }
        }
    }
}
