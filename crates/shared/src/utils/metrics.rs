use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    fs,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use sysinfo::System;

fn get_thread_count(pid: usize) -> Option<i64> {
    let contents = fs::read_to_string(format!("/proc/{pid}/status")).ok()?;

    contents
        .lines()
        .find(|line| line.starts_with("Threads:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|count| count.parse::<i64>().ok())
}

#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    pub memory_alloc_bytes: Gauge,
    pub memory_virtual_bytes: Gauge,
    pub available_memory_bytes: Gauge,
    pub thread_usage: Gauge,
    pub cpu_usage_percent: Gauge,
    pub process_start_time: Gauge,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let metrics = Self::default();
        metrics.process_start_time.set(start_time);
        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "process_memory_alloc_bytes",
            "Resident memory of the process in bytes",
            self.memory_alloc_bytes.clone(),
        );
        registry.register(
            "process_memory_virtual_bytes",
            "Virtual memory of the process in bytes",
            self.memory_virtual_bytes.clone(),
        );
        registry.register(
            "system_memory_available_bytes",
            "Available system memory in bytes",
            self.available_memory_bytes.clone(),
        );
        registry.register(
            "process_thread_total",
            "Thread total",
            self.thread_usage.clone(),
        );
        registry.register(
            "system_cpu_usage_percent",
            "Global cpu usage",
            self.cpu_usage_percent.clone(),
        );
        registry.register(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.process_start_time.clone(),
        );
    }

    pub fn update_metrics(&self, sys: &mut System) {
        sys.refresh_all();

        let pid = std::process::id() as usize;

        if let Some(process) = sys.process(sysinfo::Pid::from(pid)) {
            self.memory_alloc_bytes.set(process.memory() as i64);
            self.memory_virtual_bytes.set(process.virtual_memory() as i64);
        }

        self.available_memory_bytes
            .set(sys.available_memory() as i64);
        self.cpu_usage_percent.set(sys.global_cpu_usage() as i64);

        if let Some(thread_count) = get_thread_count(pid) {
            self.thread_usage.set(thread_count);
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    /// Registers both families under `{prefix}_request_*`.
    pub fn register(&self, prefix: &str, registry: &mut Registry) {
        registry.register(
            format!("{prefix}_request_counter"),
            format!("Total number of requests to the {prefix}"),
            self.request_counter.clone(),
        );
        registry.register(
            format!("{prefix}_request_duration"),
            format!("Histogram of request durations for the {prefix}"),
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum MailOutcome {
    Delivered,
    Failed,
    Rejected,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MailLabels {
    pub outcome: MailOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct MailMetrics {
    pub emails: Family<MailLabels, Counter>,
}

impl MailMetrics {
    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "mail_queue_emails",
            "Emails handled by the mail queue, by outcome",
            self.emails.clone(),
        );
    }

    pub fn record(&self, outcome: MailOutcome) {
        self.emails.get_or_create(&MailLabels { outcome }).inc();
    }

    pub fn count(&self, outcome: MailOutcome) -> u64 {
        self.emails.get_or_create(&MailLabels { outcome }).get()
    }
}

pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let mut sys = System::new_all();
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(15));
    loop {
        interval.tick().await;
        system_metrics.update_metrics(&mut sys);
    }
}
