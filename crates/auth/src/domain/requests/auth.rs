use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registration form. Missing fields deserialize as empty strings so they
/// surface as validation messages rather than a form rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password should be at least 8 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Password mismatch"))]
    pub password2: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
