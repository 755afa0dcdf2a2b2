use crate::{
    abstract_trait::{
        auth::{DynActivationService, RegisterServiceTrait},
        user::{DynUserCommandRepository, DynUserQueryRepository},
    },
    domain::{
        requests::{auth::RegisterRequest, user::CreateUserRequest},
        response::user::UserResponse,
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynHashing,
    domain::responses::ApiResponse,
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTracer, validation_messages_in},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use validator::Validate;

/// Order in which field messages are reported back.
const FIELD_ORDER: [&str; 4] = ["password", "password2", "email", "username"];

pub struct RegisterServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
    pub activation: DynActivationService,
    pub registry: Arc<Mutex<Registry>>,
}

#[derive(Clone)]
pub struct RegisterService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hash: DynHashing,
    activation: DynActivationService,
    tracer: ServiceTracer,
}

impl RegisterService {
    pub async fn new(deps: RegisterServiceDeps) -> Self {
        let RegisterServiceDeps {
            query,
            command,
            hash,
            activation,
            registry,
        } = deps;

        let tracer = ServiceTracer::new("register_service", &registry).await;

        Self {
            query,
            command,
            hash,
            activation,
            tracer,
        }
    }

    /// Field validation followed by the uniqueness checks. Taken names are
    /// reported as a conflict together with whatever was collected before.
    async fn check(&self, req: &RegisterRequest) -> Result<(), ServiceError> {
        let mut messages = match req.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages_in(&errors, &FIELD_ORDER),
        };

        if self.query.find_by_username(&req.username).await?.is_some() {
            messages.push("Username is taken, choose another one".into());
            return Err(ServiceError::Conflict(messages));
        }

        if self.query.find_by_email(&req.email).await?.is_some() {
            messages.push("Email is taken, choose another one".into());
            return Err(ServiceError::Conflict(messages));
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(messages))
        }
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("📝 Registering user: {}", req.username);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "RegisterUser",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.username", req.username.clone()),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        if let Err(e) = self.check(req).await {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, &e.to_string())
                .await;
            return Err(e);
        }

        let hashed_password = match self.hash.hash_password(&req.password).await {
            Ok(hashed) => hashed,
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to hash password")
                    .await;
                return Err(e);
            }
        };

        let create = CreateUserRequest {
            username: req.username.clone(),
            email: req.email.clone(),
            password: hashed_password,
        };

        let user = match self.command.create_user(&create).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists(constraint)) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Username or email raced")
                    .await;
                let message = if constraint.contains("email") {
                    "Email is taken, choose another one"
                } else {
                    "Username is taken, choose another one"
                };
                return Err(ServiceError::Conflict(vec![message.into()]));
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create user")
                    .await;
                return Err(e.into());
            }
        };

        // mail problems never fail a registration
        match self.activation.issue(&user).await {
            Ok(_) => info!("📨 Activation email queued for {}", user.email),
            Err(e) => error!("❌ Could not queue activation email for {}: {e}", user.email),
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "User registered")
            .await;

        Ok(ApiResponse::success(
            "Account created, you can now login",
            UserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::auth::ActivationServiceTrait,
        model::user::User,
        repository::user::UserRepositories,
        service::fixtures::{Fixture, SITE_URL},
    };
    use shared::mail::DeliveryReceipt;

    async fn service(fixture: &Fixture) -> RegisterService {
        RegisterService::new(RegisterServiceDeps {
            query: fixture.repos.query.clone(),
            command: fixture.repos.command.clone(),
            hash: fixture.hashing.clone(),
            activation: fixture.activation_service(),
            registry: fixture.registry.clone(),
        })
        .await
    }

    fn form(username: &str, email: &str, password: &str, password2: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password2: password2.into(),
        }
    }

    #[tokio::test]
    async fn test_every_field_problem_is_reported_in_order() {
        let fixture = Fixture::new().await;
        let register = service(&fixture).await;

        let err = register
            .register(&form("", "nope", "short", "other"))
            .await
            .unwrap_err();

        match err {
            ServiceError::Validation(messages) => assert_eq!(
                messages,
                vec![
                    "Password should be at least 8 characters",
                    "Password mismatch",
                    "Enter a valid email address",
                    "Username is required",
                ]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(fixture.repos.query.find_by_email("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_taken_username_is_a_conflict_carrying_earlier_messages() {
        let fixture = Fixture::new().await;
        let register = service(&fixture).await;

        register
            .register(&form("alice", "alice@example.com", "password123", "password123"))
            .await
            .unwrap();

        let err = register
            .register(&form("alice", "second@example.com", "password123", "mismatch99"))
            .await
            .unwrap_err();

        match err {
            ServiceError::Conflict(messages) => assert_eq!(
                messages,
                vec!["Password mismatch", "Username is taken, choose another one"]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(
            fixture
                .repos
                .query
                .find_by_email("second@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_taken_email_is_a_conflict() {
        let fixture = Fixture::new().await;
        let register = service(&fixture).await;

        register
            .register(&form("alice", "alice@example.com", "password123", "password123"))
            .await
            .unwrap();

        let err = register
            .register(&form("bob", "alice@example.com", "password123", "password123"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Conflict(ref messages)
                if messages == &vec!["Email is taken, choose another one".to_string()]
        ));
        assert!(fixture.repos.query.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_success_stores_unverified_user_and_mails_link() {
        let fixture = Fixture::new().await;
        let register = service(&fixture).await;

        let response = register
            .register(&form("alice", "alice@example.com", "password123", "password123"))
            .await
            .unwrap();

        assert_eq!(response.message, "Account created, you can now login");
        assert!(!response.data.is_email_verified);

        let stored = fixture
            .repos
            .query
            .find_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password, "password123");

        let sent = fixture.delivered(1).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
        assert_eq!(sent[0].subject, "Activate your account");
        assert!(
            sent[0]
                .data
                .link
                .starts_with(&format!("{SITE_URL}/activate-user/MQ/"))
        );
    }

    struct UnreachableMailer;

    #[async_trait]
    impl ActivationServiceTrait for UnreachableMailer {
        async fn issue(&self, _user: &User) -> Result<DeliveryReceipt, ServiceError> {
            Err(ServiceError::Mail("Mail queue is full".into()))
        }

        async fn activate(
            &self,
            _uidb64: &str,
            _token: &str,
        ) -> Result<ApiResponse<UserResponse>, ServiceError> {
            Err(ServiceError::ActivationFailed)
        }
    }

    #[tokio::test]
    async fn test_mail_failure_does_not_fail_registration() {
        let fixture = Fixture::new().await;
        let register = RegisterService::new(RegisterServiceDeps {
            query: fixture.repos.query.clone(),
            command: fixture.repos.command.clone(),
            hash: fixture.hashing.clone(),
            activation: Arc::new(UnreachableMailer),
            registry: fixture.registry.clone(),
        })
        .await;

        let response = register
            .register(&form("alice", "alice@example.com", "password123", "password123"))
            .await
            .unwrap();

        assert_eq!(response.message, "Account created, you can now login");
        assert!(
            fixture
                .repos
                .query
                .find_by_username("alice")
                .await
                .unwrap()
                .is_some()
        );
        assert!(fixture.outbox.outbox().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_race_maps_constraint_to_conflict_message() {
        let fixture = Fixture::new().await;
        // lookups see an empty table while inserts hit the populated one
        let stale = UserRepositories::memory();
        let register = RegisterService::new(RegisterServiceDeps {
            query: stale.query.clone(),
            command: fixture.repos.command.clone(),
            hash: fixture.hashing.clone(),
            activation: fixture.activation_service(),
            registry: fixture.registry.clone(),
        })
        .await;

        fixture
            .repos
            .command
            .create_user(&CreateUserRequest {
                username: "bob".into(),
                email: "bob@example.com".into(),
                password: "$2b$04$hash".into(),
            })
            .await
            .unwrap();

        let same_email = register
            .register(&form("robert", "bob@example.com", "password123", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(
            same_email,
            ServiceError::Conflict(ref messages)
                if messages == &vec!["Email is taken, choose another one".to_string()]
        ));

        let same_name = register
            .register(&form("bob", "robert@example.com", "password123", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(
            same_name,
            ServiceError::Conflict(ref messages)
                if messages == &vec!["Username is taken, choose another one".to_string()]
        ));
    }
}
