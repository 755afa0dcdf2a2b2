pub mod auth;

use crate::domain::{
    requests::auth::{LoginRequest, RegisterRequest},
    response::{token::TokenResponse, user::UserResponse},
};
use shared::errors::ErrorResponse;
use utoipa::OpenApi;

pub use self::auth::auth_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_user_handler,
        auth::login_user_handler,
        auth::logout_user_handler,
        auth::activate_user_handler,
        auth::get_me_handler,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        UserResponse,
        TokenResponse,
        ErrorResponse,
    )),
    tags((name = "Auth", description = "Registration, activation and sessions"))
)]
pub struct AuthApiDoc;
