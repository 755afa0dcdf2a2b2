use crate::state::AppState;
use anyhow::{Context, Result};
use auth::handler::{AuthApiDoc, auth_routes};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::{run_metrics_collector, shutdown_signal};
use std::{sync::Arc, time::Duration};
use todo::handler::{TodoApiDoc, todo_routes};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

const MAX_BODY_BYTES: usize = 1024 * 1024;
const MAIL_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(title = "webapp", description = "Accounts with email activation, and a todo list")
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
        );
    }
}

fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(AuthApiDoc::openapi());
    doc.merge(TodoApiDoc::openapi());
    doc
}

pub async fn health_checker_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "message": "OK"
        })),
    )
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        error!("❌ Failed to encode metrics: {e}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(shared_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(api_doc())
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_checker_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(&shared_state.di_container.auth))
            .merge(todo_routes(&shared_state.di_container.todo));

        let router_with_layers = api_router
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let mail_worker = app_state.take_mail_worker().await;

        tokio::spawn(run_metrics_collector(app_state.system_metrics.clone()));

        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        // the router owned the last queue sender, so the worker finishes what is queued
        if let Some(worker) = mail_worker {
            match tokio::time::timeout(MAIL_DRAIN_TIMEOUT, worker).await {
                Ok(Ok(())) => info!("📭 Mail queue drained"),
                Ok(Err(e)) => error!("❌ Mail worker panicked: {e}"),
                Err(_) => warn!("⚠️ Gave up waiting for the mail queue to drain"),
            }
        }

        Ok(())
    }
}
