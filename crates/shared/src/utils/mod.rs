mod logs;
mod metrics;
mod otel;
mod shutdown;
mod template;
mod tracer;
mod validation;

pub use self::logs::init_logger;
pub use self::metrics::{
    MailMetrics, MailOutcome, Method, Metrics, Status, SystemMetrics, run_metrics_collector,
};
pub use self::otel::{Telemetry, TracingContext};
pub use self::shutdown::shutdown_signal;
pub use self::template::{EmailTemplate, EmailTemplateData, render_email};
pub use self::tracer::ServiceTracer;
pub use self::validation::{validation_messages, validation_messages_in};
