use crate::{
    abstract_trait::{
        auth::{ActivationServiceTrait, DynActivationToken},
        user::{DynUserCommandRepository, DynUserQueryRepository},
    },
    domain::response::user::UserResponse,
    model::user::User,
    service::token::{decode_uid, encode_uid},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynMailDispatcher,
    domain::{requests::EmailRequest, responses::ApiResponse},
    errors::ServiceError,
    mail::DeliveryReceipt,
    utils::{EmailTemplateData, Method, ServiceTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct ActivationServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub tokens: DynActivationToken,
    pub mailer: DynMailDispatcher,
    /// Absolute base for links, without trailing slash.
    pub site_url: String,
    pub registry: Arc<Mutex<Registry>>,
}

#[derive(Clone)]
pub struct ActivationService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    tokens: DynActivationToken,
    mailer: DynMailDispatcher,
    site_url: String,
    tracer: ServiceTracer,
}

impl ActivationService {
    pub async fn new(deps: ActivationServiceDeps) -> Self {
        let ActivationServiceDeps {
            query,
            command,
            tokens,
            mailer,
            site_url,
            registry,
        } = deps;

        let tracer = ServiceTracer::new("activation_service", &registry).await;

        Self {
            query,
            command,
            tokens,
            mailer,
            site_url,
            tracer,
        }
    }

    pub fn activation_link(&self, user: &User) -> Result<String, ServiceError> {
        let token = self.tokens.make_token(user)?;

        Ok(format!(
            "{}/activate-user/{}/{}",
            self.site_url,
            encode_uid(user.user_id),
            token
        ))
    }

    async fn find_candidate(&self, uidb64: &str) -> Option<User> {
        let user_id = decode_uid(uidb64)?;

        match self.query.find_by_id(user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!("⚠️ Activation lookup for user {user_id} failed: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl ActivationServiceTrait for ActivationService {
    async fn issue(&self, user: &User) -> Result<DeliveryReceipt, ServiceError> {
        let link = self.activation_link(user)?;

        let request = EmailRequest {
            to: user.email.clone(),
            subject: "Activate your account".into(),
            data: EmailTemplateData {
                title: "Activate your account".into(),
                greeting: format!("Hi {},", user.username),
                message: "Please use the link below to verify your account.".into(),
                button: "Activate account".into(),
                link,
            },
        };

        self.mailer.dispatch(request).await
    }

    async fn activate(
        &self,
        uidb64: &str,
        token: &str,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "ActivateUser",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.uid", uidb64.to_string()),
            ],
        );

        let user = match self.find_candidate(uidb64).await {
            Some(user) if self.tokens.check_token(&user, token) => user,
            _ => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Activation link rejected")
                    .await;
                return Err(ServiceError::ActivationFailed);
            }
        };

        let user = match self
            .command
            .update_is_email_verified(user.user_id, true)
            .await
        {
            Ok(user) => user,
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to mark user verified")
                    .await;
                return Err(e.into());
            }
        };

        info!("✅ Email verified for user {}", user.username);

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "User activated")
            .await;

        Ok(ApiResponse::success(
            "Email verified, you can now login",
            UserResponse::from(user),
        ))
    }
}
