use crate::{
    abstract_trait::{auth::LoginServiceTrait, user::DynUserQueryRepository},
    domain::{
        requests::auth::LoginRequest,
        response::{token::TokenResponse, user::UserResponse},
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::ACCESS_TOKEN,
    domain::responses::ApiResponse,
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct LoginServiceDeps {
    pub query: DynUserQueryRepository,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
}

#[derive(Clone)]
pub struct LoginService {
    query: DynUserQueryRepository,
    hash: DynHashing,
    jwt: DynJwtService,
    tracer: ServiceTracer,
}

impl LoginService {
    pub async fn new(deps: LoginServiceDeps) -> Self {
        let LoginServiceDeps {
            query,
            hash,
            jwt,
            registry,
        } = deps;

        let tracer = ServiceTracer::new("login_service", &registry).await;

        Self {
            query,
            hash,
            jwt,
            tracer,
        }
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let username = &request.username;

        info!("🔐 Attempting login for username: {username}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "Login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.username", username.to_string()),
            ],
        );

        let user = match self.query.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Unknown username")
                    .await;
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to look up user")
                    .await;
                return Err(e.into());
            }
        };

        if self
            .hash
            .compare_password(&user.password, &request.password)
            .await
            .is_err()
        {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Invalid password")
                .await;
            return Err(ServiceError::InvalidCredentials);
        }

        if !user.is_email_verified {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Email is not verified")
                .await;
            return Err(ServiceError::EmailNotVerified);
        }

        let access_token = match self.jwt.generate_token(user.user_id as i64, ACCESS_TOKEN) {
            Ok(token) => token,
            Err(e) => {
                self.tracer
                    .complete_tracing_error(
                        &tracing_ctx,
                        method,
                        "Failed to generate access token",
                    )
                    .await;
                return Err(e);
            }
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Login successful")
            .await;

        Ok(ApiResponse::success(
            format!("Welcome {}", user.username),
            TokenResponse {
                access_token,
                user: UserResponse::from(user),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::user::CreateUserRequest;
    use crate::service::fixtures::Fixture;
    use chrono::Duration;
    use shared::{abstract_trait::HashingTrait, config::JwtConfig};

    async fn setup(verified: bool) -> (LoginService, DynJwtService) {
        let fixture = Fixture::new().await;
        let password = fixture.hashing.hash_password("password123").await.unwrap();

        let user = fixture
            .repos
            .command
            .create_user(&CreateUserRequest {
                username: "alice".into(),
                email: "alice@example.com".into(),
                password,
            })
            .await
            .unwrap();
        if verified {
            fixture
                .repos
                .command
                .update_is_email_verified(user.user_id, true)
                .await
                .unwrap();
        }

        let jwt: DynJwtService = Arc::new(JwtConfig::new("test-secret", Duration::minutes(60)));
        let service = LoginService::new(LoginServiceDeps {
            query: fixture.repos.query.clone(),
            hash: fixture.hashing.clone(),
            jwt: jwt.clone(),
            registry: fixture.registry.clone(),
        })
        .await;

        (service, jwt)
    }

    fn creds(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_unverified_user_cannot_log_in() {
        let (login, _) = setup(false).await;

        assert!(matches!(
            login.login(&creds("alice", "password123")).await,
            Err(ServiceError::EmailNotVerified)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_or_unknown_user() {
        let (login, _) = setup(true).await;

        assert!(matches!(
            login.login(&creds("alice", "wrong-password")).await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            login.login(&creds("nobody", "password123")).await,
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_verified_user_gets_a_session_token() {
        let (login, jwt) = setup(true).await;

        let response = login.login(&creds("alice", "password123")).await.unwrap();

        assert_eq!(response.message, "Welcome alice");
        assert_eq!(
            jwt.verify_token(&response.data.access_token, ACCESS_TOKEN).unwrap(),
            response.data.user.id as i64
        );
    }
}
