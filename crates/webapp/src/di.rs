use auth::{
    di::{DependenciesInject as AuthDependencies, DependenciesInjectDeps as AuthDeps},
    repository::user::UserRepositories,
};
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService, DynMailDispatcher},
    config::ConnectionPool,
};
use std::{fmt, sync::Arc};
use todo::{di::DependenciesInject as TodoDependencies, repository::todo::TodoRepositories};
use tokio::sync::Mutex;

/// Record stores for both apps, backed by the same storage.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepositories,
    pub todos: TodoRepositories,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            users: UserRepositories::postgres(pool.clone()),
            todos: TodoRepositories::postgres(pool),
        }
    }

    pub fn memory() -> Self {
        Self {
            users: UserRepositories::memory(),
            todos: TodoRepositories::memory(),
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth: AuthDependencies,
    pub todo: TodoDependencies,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth", &self.auth)
            .field("todo", &self.todo)
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub mailer: DynMailDispatcher,
    pub secret: String,
    pub activation_ttl: Duration,
    pub site_url: String,
    pub secure_cookies: bool,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps, registry: Arc<Mutex<Registry>>) -> Self {
        let DependenciesInjectDeps {
            repositories,
            hash,
            jwt,
            mailer,
            secret,
            activation_ttl,
            site_url,
            secure_cookies,
        } = deps;

        let auth = AuthDependencies::new(AuthDeps {
            repositories: repositories.users,
            hash,
            jwt,
            mailer,
            secret,
            activation_ttl,
            site_url,
            secure_cookies,
            registry: registry.clone(),
        })
        .await;

        let todo = TodoDependencies::new(repositories.todos, registry).await;

        Self { auth, todo }
    }
}
