use crate::{
    abstract_trait::auth::DynActivationService,
    repository::user::UserRepositories,
    service::{
        activation::{ActivationService, ActivationServiceDeps},
        token::ActivationTokenGenerator,
    },
};
use chrono::Duration;
use prometheus_client::registry::Registry;
use shared::{
    config::Hashing,
    domain::requests::EmailRequest,
    mail::{MailQueue, MemoryEmailService},
    utils::MailMetrics,
};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const SITE_URL: &str = "http://testserver";

pub struct Fixture {
    pub repos: UserRepositories,
    pub outbox: MemoryEmailService,
    pub activation: Arc<ActivationService>,
    pub hashing: Arc<Hashing>,
    pub registry: Arc<Mutex<Registry>>,
}

impl Fixture {
    pub async fn new() -> Self {
        let repos = UserRepositories::memory();
        let registry = Arc::new(Mutex::new(Registry::default()));
        let outbox = MemoryEmailService::new();
        let (queue, _worker) =
            MailQueue::start(Arc::new(outbox.clone()), 8, MailMetrics::default());

        let activation = Arc::new(
            ActivationService::new(ActivationServiceDeps {
                query: repos.query.clone(),
                command: repos.command.clone(),
                tokens: Arc::new(ActivationTokenGenerator::new(
                    "test-secret",
                    Duration::hours(72),
                )),
                mailer: Arc::new(queue),
                site_url: SITE_URL.into(),
                registry: registry.clone(),
            })
            .await,
        );

        Self {
            repos,
            outbox,
            activation,
            hashing: Arc::new(Hashing::new(4)),
            registry,
        }
    }

    pub fn activation_service(&self) -> DynActivationService {
        self.activation.clone()
    }

    /// Waits for the mail worker to hand over `count` messages.
    pub async fn delivered(&self, count: usize) -> Vec<EmailRequest> {
        for _ in 0..100 {
            let sent = self.outbox.outbox().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.outbox.outbox().await
    }
}

/// Splits `.../activate-user/{uid}/{token}` into its two path parameters.
pub fn link_parts(link: &str) -> (String, String) {
    let tail = link
        .split("/activate-user/")
        .nth(1)
        .expect("activation link");
    let (uid, token) = tail.split_once('/').expect("uid/token");

    (uid.to_string(), token.to_string())
}
