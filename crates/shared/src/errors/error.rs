use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status: "error".into(),
            message: message.into(),
            errors,
        }
    }
}
