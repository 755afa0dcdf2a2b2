use anyhow::{Context, Result, anyhow};
use chrono::Duration;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    Smtp(SmtpConfig),
    /// Renders the message and writes it to the log instead of sending it.
    Log,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from: String,
    pub backend: MailBackend,
    pub queue_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub run_migrations: bool,
    pub port: u16,
    pub jwt_secret: String,
    pub session_ttl: Duration,
    pub activation_ttl: Duration,
    pub bcrypt_cost: u32,
    pub site_url: String,
    pub mail: MailConfig,
    pub otel_endpoint: String,
    pub dev_mode: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("Missing environment variable: {key}"))
        };

        let storage = match lookup("STORAGE").as_deref().unwrap_or("postgres") {
            "postgres" => StorageBackend::Postgres {
                database_url: required("DATABASE_URL")?,
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(anyhow!(
                    "STORAGE must be 'postgres' or 'memory', got '{}'",
                    other
                ));
            }
        };

        let run_migrations = match required("RUN_MIGRATIONS")?.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let jwt_secret = required("JWT_SECRET")?;
        let site_url = required("SITE_URL")?.trim_end_matches('/').to_string();

        let session_minutes: i64 = parse_or(&lookup, "SESSION_TTL_MINUTES", 60)?;
        let activation_hours: i64 = parse_or(&lookup, "ACTIVATION_TOKEN_TTL_HOURS", 72)?;
        let bcrypt_cost: u32 = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        let backend = match lookup("MAIL_BACKEND").as_deref().unwrap_or("smtp") {
            "smtp" => MailBackend::Smtp(SmtpConfig {
                smtp_server: required("SMTP_HOST")?,
                smtp_port: parse_or(&lookup, "SMTP_PORT", 587)?,
                smtp_user: required("SMTP_USERNAME")?,
                smtp_pass: required("SMTP_PASSWORD")?,
            }),
            "log" => MailBackend::Log,
            other => {
                return Err(anyhow!(
                    "MAIL_BACKEND must be 'smtp' or 'log', got '{}'",
                    other
                ));
            }
        };

        let mail = MailConfig {
            from: required("EMAIL_FROM_USER")?,
            backend,
            queue_capacity: parse_or(&lookup, "MAIL_QUEUE_CAPACITY", 100)?,
        };

        let otel_endpoint = lookup("OTEL_ENDPOINT")
            .unwrap_or_else(|| "http://otel-collector:4317".to_string());

        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        Ok(Self {
            storage,
            run_migrations,
            port,
            jwt_secret,
            session_ttl: Duration::minutes(session_minutes),
            activation_ttl: Duration::hours(activation_hours),
            bcrypt_cost,
            site_url,
            mail,
            otel_endpoint,
            dev_mode: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_memory_storage_with_log_mailer() {
        let vars = env(&[
            ("STORAGE", "memory"),
            ("RUN_MIGRATIONS", "false"),
            ("PORT", "8000"),
            ("JWT_SECRET", "secret"),
            ("SITE_URL", "http://localhost:8000/"),
            ("MAIL_BACKEND", "log"),
            ("EMAIL_FROM_USER", "noreply@example.com"),
        ]);

        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.mail.backend, MailBackend::Log);
        assert_eq!(config.site_url, "http://localhost:8000");
        assert_eq!(config.activation_ttl, Duration::hours(72));
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let vars = env(&[
            ("RUN_MIGRATIONS", "true"),
            ("PORT", "8000"),
            ("JWT_SECRET", "secret"),
            ("SITE_URL", "http://localhost:8000"),
            ("MAIL_BACKEND", "log"),
            ("EMAIL_FROM_USER", "noreply@example.com"),
        ]);

        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_rejects_unknown_mail_backend() {
        let vars = env(&[
            ("STORAGE", "memory"),
            ("RUN_MIGRATIONS", "false"),
            ("PORT", "8000"),
            ("JWT_SECRET", "secret"),
            ("SITE_URL", "http://localhost:8000"),
            ("MAIL_BACKEND", "carrier-pigeon"),
            ("EMAIL_FROM_USER", "noreply@example.com"),
        ]);

        assert!(Config::from_lookup(|k| vars.get(k).cloned()).is_err());
    }
}
