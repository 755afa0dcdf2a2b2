use crate::{
    di::DependenciesInject,
    domain::{
        requests::auth::{LoginRequest, RegisterRequest},
        response::{token::TokenResponse, user::UserResponse},
    },
    middleware::{SessionCookie, auth_middleware, guest_only_middleware},
};
use crate::abstract_trait::auth::{
    DynActivationService, DynIdentityService, DynLoginService, DynRegisterService,
};
use axum::{
    Extension, Form, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    domain::responses::ApiResponse,
    errors::{ErrorResponse, HttpError},
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse),
        (status = 303, description = "Already signed in")
    ),
    tag = "Auth"
)]
pub async fn register_user_handler(
    Extension(service): Extension<DynRegisterService>,
    Form(body): Form<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Signed in, session cookie set", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials or email not verified", body = ErrorResponse),
        (status = 303, description = "Already signed in")
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    Extension(service): Extension<DynLoginService>,
    Extension(session): Extension<SessionCookie>,
    jar: CookieJar,
    Form(body): Form<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;
    let jar = jar.add(session.issue(response.data.access_token.clone()));

    Ok((StatusCode::OK, jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session cookie removed", body = ApiResponse<bool>)
    ),
    tag = "Auth"
)]
pub async fn logout_user_handler(
    Extension(session): Extension<SessionCookie>,
    jar: CookieJar,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        jar.remove(session.removal()),
        Json(ApiResponse::success("Successfully logged out", true)),
    )
}

#[utoipa::path(
    get,
    path = "/activate-user/{uid}/{token}",
    params(
        ("uid" = String, Path, description = "URL-safe base64 of the user id"),
        ("token" = String, Path, description = "Activation token from the email")
    ),
    responses(
        (status = 200, description = "Email verified", body = ApiResponse<UserResponse>),
        (status = 400, description = "Activation failed", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn activate_user_handler(
    Extension(service): Extension<DynActivationService>,
    Path((uid, token)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.activate(&uid, &token).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Signed-in user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth",
)]
pub async fn get_me_handler(
    Extension(service): Extension<DynIdentityService>,
    Extension(user_id): Extension<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_me(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn auth_routes(di: &DependenciesInject) -> OpenApiRouter {
    let guest_routes = OpenApiRouter::new()
        .route("/register", post(register_user_handler))
        .route("/login", post(login_user_handler))
        .route_layer(middleware::from_fn(guest_only_middleware))
        .layer(Extension(di.register_service.clone()))
        .layer(Extension(di.login_service.clone()));

    let public_routes = OpenApiRouter::new()
        .route("/logout", post(logout_user_handler))
        .route("/activate-user/{uid}/{token}", get(activate_user_handler))
        .layer(Extension(di.activation_service.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/me", get(get_me_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(di.identity_service.clone()));

    guest_routes
        .merge(public_routes)
        .merge(private_routes)
        .layer(Extension(di.session))
        .layer(Extension(di.jwt.clone()))
}
