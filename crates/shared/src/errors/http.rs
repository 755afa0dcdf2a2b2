use crate::errors::{ErrorResponse, RepositoryError, ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String, Vec<String>),
    Unauthorized(String),
    NotFound(String),
    Conflict(String, Vec<String>),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadRequest("Validation failed".into(), errors)
            }

            ServiceError::Conflict(errors) => HttpError::Conflict("Conflict".into(), errors),

            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("Invalid credentials".into())
            }

            ServiceError::EmailNotVerified => HttpError::Unauthorized(
                "Email is not verified, please check your email inbox".into(),
            ),

            ServiceError::ActivationFailed => HttpError::BadRequest(
                "Activation failed, the link is invalid or has already been used".into(),
                vec![],
            ),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::AlreadyExists(msg) => {
                    HttpError::Conflict("Already exists".into(), vec![msg])
                }
                other => {
                    error!("❌ Repository failure: {other}");
                    HttpError::Internal("Repository error".into())
                }
            },

            ServiceError::Jwt(err) => HttpError::Unauthorized(format!("JWT error: {err}")),

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::InvalidTokenType => HttpError::Unauthorized("Invalid token type".into()),

            ServiceError::Mail(msg) => HttpError::ServiceUnavailable(msg),

            ServiceError::Bcrypt(_) => {
                HttpError::Internal("Internal authentication error".into())
            }

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg, errors) = match self {
            HttpError::BadRequest(msg, errors) => (StatusCode::BAD_REQUEST, msg, errors),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, vec![]),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, vec![]),
            HttpError::Conflict(msg, errors) => (StatusCode::CONFLICT, msg, errors),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, vec![]),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, vec![]),
        };

        (status, Json(ErrorResponse::new(msg, errors))).into_response()
    }
}
