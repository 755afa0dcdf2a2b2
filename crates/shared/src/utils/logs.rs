use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logger(
    sdk_logger_provider: SdkLoggerProvider,
    component: &str,
    is_dev: bool,
    enable_file_log: bool,
) {
    let file_layer = if enable_file_log {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };

        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        // the writer lives for the whole process
        std::mem::forget(guard);

        Some(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new("info")),
        )
    } else {
        None
    };

    let default_console = if is_dev { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_console));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let otel_filter = EnvFilter::new("info")
        .add_directive("hyper=off".parse().expect("static directive"))
        .add_directive("opentelemetry=off".parse().expect("static directive"))
        .add_directive("tonic=off".parse().expect("static directive"))
        .add_directive("h2=off".parse().expect("static directive"))
        .add_directive("sqlx=off".parse().expect("static directive"));

    let otel_layer = OpenTelemetryTracingBridge::new(&sdk_logger_provider).with_filter(otel_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();
}
