#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use serde_json::Value;
use shared::{config::Config, domain::requests::EmailRequest, mail::MemoryEmailService};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tower::ServiceExt;
use webapp::{di::Repositories, handler::AppRouter, state::AppState};

pub const SITE_URL: &str = "http://testserver";

pub struct TestApp {
    pub router: Router,
    pub outbox: MemoryEmailService,
}

fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("STORAGE", "memory"),
        ("RUN_MIGRATIONS", "false"),
        ("PORT", "0"),
        ("JWT_SECRET", "integration-secret"),
        ("SITE_URL", SITE_URL),
        ("MAIL_BACKEND", "log"),
        ("EMAIL_FROM_USER", "noreply@example.com"),
        ("BCRYPT_COST", "4"),
    ]);

    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

impl TestApp {
    pub async fn spawn() -> Self {
        let outbox = MemoryEmailService::new();
        let state = AppState::with_mailer(
            &test_config(),
            Repositories::memory(),
            Arc::new(outbox.clone()),
        )
        .await;

        Self {
            router: AppRouter::build(Arc::new(state)),
            outbox,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.get_with_cookie(uri, None).await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        self.post_form_with_cookie(uri, fields, None).await
    }

    pub async fn post_form_with_cookie(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Waits for the mail worker to deliver `count` messages.
    pub async fn delivered(&self, count: usize) -> Vec<EmailRequest> {
        for _ in 0..200 {
            let sent = self.outbox.outbox().await;
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.outbox.outbox().await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Response<Body> {
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("email", email),
                ("password", password),
                ("password2", password),
            ],
        )
        .await
    }

    /// Registers, follows the emailed link, and returns the session cookie from logging in.
    pub async fn signed_in_user(&self, username: &str) -> String {
        let email = format!("{username}@example.com");
        self.register(username, &email, "password123").await;

        let link = self
            .delivered(1)
            .await
            .into_iter()
            .find(|mail| mail.to == email)
            .map(|mail| mail.data.link)
            .unwrap();
        self.get(activation_path(&link)).await;

        let response = self
            .post_form("/login", &[("username", username), ("password", "password123")])
            .await;
        session_cookie(&response).unwrap()
    }
}

pub fn activation_path(link: &str) -> &str {
    link.strip_prefix(SITE_URL).unwrap()
}

/// `name=value` of the session cookie set by the response, ready for a `Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("token="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap()
}

pub async fn json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn messages(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
