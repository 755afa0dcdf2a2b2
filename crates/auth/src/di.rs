use crate::{
    abstract_trait::auth::{
        DynActivationService, DynIdentityService, DynLoginService, DynRegisterService,
    },
    middleware::SessionCookie,
    repository::user::UserRepositories,
    service::{
        activation::{ActivationService, ActivationServiceDeps},
        identity::IdentityService,
        login::{LoginService, LoginServiceDeps},
        register::{RegisterService, RegisterServiceDeps},
        token::ActivationTokenGenerator,
    },
};
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::abstract_trait::{DynHashing, DynJwtService, DynMailDispatcher};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub register_service: DynRegisterService,
    pub login_service: DynLoginService,
    pub identity_service: DynIdentityService,
    pub activation_service: DynActivationService,
    pub jwt: DynJwtService,
    pub session: SessionCookie,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("register_service", &"RegisterService")
            .field("login_service", &"LoginService")
            .field("identity_service", &"IdentityService")
            .field("activation_service", &"ActivationService")
            .field("session", &self.session)
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub repositories: UserRepositories,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub mailer: DynMailDispatcher,
    /// Signs activation tokens.
    pub secret: String,
    pub activation_ttl: Duration,
    pub site_url: String,
    pub secure_cookies: bool,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            repositories,
            hash,
            jwt,
            mailer,
            secret,
            activation_ttl,
            site_url,
            secure_cookies,
            registry,
        } = deps;

        let activation_service = Arc::new(
            ActivationService::new(ActivationServiceDeps {
                query: repositories.query.clone(),
                command: repositories.command.clone(),
                tokens: Arc::new(ActivationTokenGenerator::new(&secret, activation_ttl)),
                mailer,
                site_url,
                registry: registry.clone(),
            })
            .await,
        ) as DynActivationService;

        let register_service = Arc::new(
            RegisterService::new(RegisterServiceDeps {
                query: repositories.query.clone(),
                command: repositories.command.clone(),
                hash: hash.clone(),
                activation: activation_service.clone(),
                registry: registry.clone(),
            })
            .await,
        ) as DynRegisterService;

        let login_service = Arc::new(
            LoginService::new(LoginServiceDeps {
                query: repositories.query.clone(),
                hash,
                jwt: jwt.clone(),
                registry: registry.clone(),
            })
            .await,
        ) as DynLoginService;

        let identity_service =
            Arc::new(IdentityService::new(repositories.query, registry).await) as DynIdentityService;

        Self {
            register_service,
            login_service,
            identity_service,
            activation_service,
            jwt,
            session: SessionCookie::new(secure_cookies),
        }
    }
}
