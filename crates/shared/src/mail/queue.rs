use crate::{
    abstract_trait::{DynEmailService, MailDispatcherTrait},
    domain::requests::EmailRequest,
    errors::ServiceError,
    utils::{MailMetrics, MailOutcome},
};
use async_trait::async_trait;
use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        oneshot,
    },
    task::JoinHandle,
};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed(String),
    /// The worker went away before reporting.
    Dropped,
}

/// Handle to a queued email. Dropping it is fine; awaiting it yields the outcome.
#[derive(Debug)]
pub struct DeliveryReceipt {
    rx: oneshot::Receiver<DeliveryStatus>,
}

impl DeliveryReceipt {
    pub async fn outcome(self) -> DeliveryStatus {
        self.rx.await.unwrap_or(DeliveryStatus::Dropped)
    }
}

struct MailJob {
    request: EmailRequest,
    reply: oneshot::Sender<DeliveryStatus>,
}

#[derive(Clone)]
pub struct MailQueue {
    tx: mpsc::Sender<MailJob>,
    metrics: MailMetrics,
}

impl MailQueue {
    /// Spawns the delivery worker. It stops once every `MailQueue` clone is dropped.
    pub fn start(
        mailer: DynEmailService,
        capacity: usize,
        metrics: MailMetrics,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(rx, mailer, metrics.clone()));

        (Self { tx, metrics }, handle)
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<MailJob>,
    mailer: DynEmailService,
    metrics: MailMetrics,
) {
    info!("🚀 Starting mail queue worker...");

    while let Some(job) = rx.recv().await {
        let status = match mailer.send(&job.request).await {
            Ok(()) => {
                metrics.record(MailOutcome::Delivered);
                DeliveryStatus::Delivered
            }
            Err(e) => {
                error!("❌ Failed to deliver email to {}: {e}", job.request.to);
                metrics.record(MailOutcome::Failed);
                DeliveryStatus::Failed(e.to_string())
            }
        };

        // nobody is obliged to wait for the receipt
        let _ = job.reply.send(status);
    }

    info!("Mail queue worker stopped");
}

#[async_trait]
impl MailDispatcherTrait for MailQueue {
    async fn dispatch(&self, request: EmailRequest) -> Result<DeliveryReceipt, ServiceError> {
        let (reply, rx) = oneshot::channel();

        self.tx
            .try_send(MailJob { request, reply })
            .map_err(|e| {
                self.metrics.record(MailOutcome::Rejected);
                match e {
                    TrySendError::Full(job) => {
                        warn!("⚠️ Mail queue is full, dropping email to {}", job.request.to);
                        ServiceError::Mail("Mail queue is full".into())
                    }
                    TrySendError::Closed(_) => ServiceError::Mail("Mail queue is closed".into()),
                }
            })?;

        Ok(DeliveryReceipt { rx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::EmailServiceTrait, mail::MemoryEmailService, utils::EmailTemplateData,
    };
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn request(to: &str) -> EmailRequest {
        EmailRequest {
            to: to.to_string(),
            subject: "Activate your account".into(),
            data: EmailTemplateData {
                title: "Activate your account".into(),
                greeting: "Hi".into(),
                message: "Click below".into(),
                button: "Activate".into(),
                link: "http://localhost/activate-user/MQ/token".into(),
            },
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl EmailServiceTrait for FailingMailer {
        async fn send(&self, _req: &EmailRequest) -> Result<(), ServiceError> {
            Err(ServiceError::Mail("connection refused".into()))
        }
    }

    struct BlockingMailer {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl EmailServiceTrait for BlockingMailer {
        async fn send(&self, _req: &EmailRequest) -> Result<(), ServiceError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_receipt_reports_delivery() {
        let outbox = MemoryEmailService::new();
        let metrics = MailMetrics::default();
        let (queue, _handle) = MailQueue::start(Arc::new(outbox.clone()), 8, metrics.clone());

        let receipt = queue.dispatch(request("alice@example.com")).await.unwrap();

        assert_eq!(receipt.outcome().await, DeliveryStatus::Delivered);
        assert_eq!(outbox.outbox().await.len(), 1);
        assert_eq!(metrics.count(MailOutcome::Delivered), 1);
    }

    #[tokio::test]
    async fn test_receipt_reports_transport_failure() {
        let metrics = MailMetrics::default();
        let (queue, _handle) = MailQueue::start(Arc::new(FailingMailer), 8, metrics.clone());

        let receipt = queue.dispatch(request("bob@example.com")).await.unwrap();

        match receipt.outcome().await {
            DeliveryStatus::Failed(reason) => assert!(reason.contains("connection refused")),
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(metrics.count(MailOutcome::Failed), 1);
    }

    #[tokio::test]
    async fn test_full_queue_rejects_without_blocking() {
        let mailer = Arc::new(BlockingMailer {
            started: Notify::new(),
            release: Notify::new(),
        });
        let metrics = MailMetrics::default();
        let (queue, _handle) = MailQueue::start(mailer.clone(), 1, metrics.clone());

        let first = queue.dispatch(request("one@example.com")).await.unwrap();
        mailer.started.notified().await;

        let _second = queue.dispatch(request("two@example.com")).await.unwrap();
        let third = queue.dispatch(request("three@example.com")).await;

        assert!(matches!(third, Err(ServiceError::Mail(_))));
        assert_eq!(metrics.count(MailOutcome::Rejected), 1);

        mailer.release.notify_one();
        assert_eq!(first.outcome().await, DeliveryStatus::Delivered);
    }

    #[tokio::test]
    async fn test_worker_stops_when_queue_dropped() {
        let (queue, handle) =
            MailQueue::start(Arc::new(MemoryEmailService::new()), 4, MailMetrics::default());

        drop(queue);

        handle.await.unwrap();
    }
}
