use anyhow::Result;
use opentelemetry::{Context, global};
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource, logs::SdkLoggerProvider, metrics::SdkMeterProvider, trace::SdkTracerProvider,
};
use tokio::time::Instant;

pub struct Telemetry {
    service_name: String,
    otel_endpoint: String,
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
    logger_provider: Option<SdkLoggerProvider>,
}

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

impl Telemetry {
    pub fn new(service_name: impl Into<String>, otel_endpoint: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            otel_endpoint: otel_endpoint.into(),
            tracer_provider: None,
            meter_provider: None,
            logger_provider: None,
        }
    }

    fn get_resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .build()
    }

    pub fn init_tracer(&mut self) -> Result<SdkTracerProvider> {
        let exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()?;

        let provider = SdkTracerProvider::builder()
            .with_resource(self.get_resource())
            .with_batch_exporter(exporter)
            .build();

        global::set_tracer_provider(provider.clone());
        self.tracer_provider = Some(provider.clone());

        Ok(provider)
    }

    pub fn init_meter(&mut self) -> Result<SdkMeterProvider> {
        let exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()?;

        let provider = SdkMeterProvider::builder()
            .with_resource(self.get_resource())
            .with_periodic_exporter(exporter)
            .build();

        global::set_meter_provider(provider.clone());
        self.meter_provider = Some(provider.clone());

        Ok(provider)
    }

    pub fn init_logger(&mut self) -> Result<SdkLoggerProvider> {
        let exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(self.otel_endpoint.clone())
            .build()?;

        let provider = SdkLoggerProvider::builder()
            .with_resource(self.get_resource())
            .with_batch_exporter(exporter)
            .build();

        self.logger_provider = Some(provider.clone());

        Ok(provider)
    }

    pub async fn shutdown(self) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(Err(e)) = self.tracer_provider.map(|p| p.shutdown()) {
            errors.push(format!("tracer provider: {e}"));
        }
        if let Some(Err(e)) = self.meter_provider.map(|p| p.shutdown()) {
            errors.push(format!("meter provider: {e}"));
        }
        if let Some(Err(e)) = self.logger_provider.map(|p| p.shutdown()) {
            errors.push(format!("logger provider: {e}"));
        }

        if !errors.is_empty() {
            anyhow::bail!("Failed to shutdown providers:\n{}", errors.join("\n"));
        }

        Ok(())
    }
}
