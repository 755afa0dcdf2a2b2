use crate::di::{DependenciesInject, DependenciesInjectDeps, Repositories};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynEmailService, DynHashing, DynJwtService},
    config::{Config, Hashing, JwtConfig, MailBackend},
    mail::{LogEmailService, MailQueue, SmtpEmailService},
    utils::{MailMetrics, SystemMetrics},
};
use std::{fmt, sync::Arc};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
    pub mail_metrics: MailMetrics,
    mail_worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    /// Builds the mail transport selected by `MAIL_BACKEND`.
    pub async fn new(config: &Config, repositories: Repositories) -> Result<Self> {
        let transport: DynEmailService = match &config.mail.backend {
            MailBackend::Smtp(smtp) => {
                info!("📮 Delivering mail through SMTP relay {}", smtp.smtp_server);
                Arc::new(
                    SmtpEmailService::new(smtp, &config.mail.from)
                        .context("Failed to build SMTP transport")?,
                )
            }
            MailBackend::Log => {
                info!("📝 Mail backend is 'log', emails will only be logged");
                Arc::new(LogEmailService::new(config.mail.from.clone()))
            }
        };

        Ok(Self::with_mailer(config, repositories, transport).await)
    }

    pub async fn with_mailer(
        config: &Config,
        repositories: Repositories,
        transport: DynEmailService,
    ) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());
        let mail_metrics = MailMetrics::default();

        {
            let mut registry = registry.lock().await;
            system_metrics.register(&mut registry);
            mail_metrics.register(&mut registry);
        }

        let (queue, mail_worker) =
            MailQueue::start(transport, config.mail.queue_capacity, mail_metrics.clone());

        let jwt_config =
            Arc::new(JwtConfig::new(&config.jwt_secret, config.session_ttl)) as DynJwtService;
        let hashing = Arc::new(Hashing::new(config.bcrypt_cost)) as DynHashing;

        let deps = DependenciesInjectDeps {
            repositories,
            hash: hashing,
            jwt: jwt_config.clone(),
            mailer: Arc::new(queue),
            secret: config.jwt_secret.clone(),
            activation_ttl: config.activation_ttl,
            site_url: config.site_url.clone(),
            secure_cookies: !config.dev_mode,
        };

        let di_container = DependenciesInject::new(deps, registry.clone()).await;

        Self {
            di_container,
            jwt_config,
            registry,
            system_metrics,
            mail_metrics,
            mail_worker: Arc::new(Mutex::new(Some(mail_worker))),
        }
    }

    /// Hands out the mail worker handle once, so shutdown can wait for the queue to drain.
    pub async fn take_mail_worker(&self) -> Option<JoinHandle<()>> {
        self.mail_worker.lock().await.take()
    }
}
