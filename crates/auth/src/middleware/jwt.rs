use crate::middleware::session::SESSION_COOKIE;
use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, config::ACCESS_TOKEN, errors::ErrorResponse};
use tracing::info;

fn session_token(cookie_jar: &CookieJar, req: &Request<Body>) -> Option<String> {
    cookie_jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
}

/// Puts the signed-in user id (`i32`) into the request extensions.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = match session_token(&cookie_jar, &req) {
        Some(token) => token,
        None => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "You are not logged in, please provide token",
                    vec![],
                )),
            ));
        }
    };

    let user_id = match jwt.verify_token(&token, ACCESS_TOKEN) {
        Ok(id) => id as i32,
        Err(_) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid token", vec![])),
            ));
        }
    };

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}

/// Sends signed-in users home instead of showing them login or registration.
pub async fn guest_only_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let signed_in = session_token(&cookie_jar, &req)
        .map(|token| jwt.verify_token(&token, ACCESS_TOKEN).is_ok())
        .unwrap_or(false);

    if signed_in {
        info!("↪️ Signed-in user hit {}, redirecting home", req.uri().path());
        return Redirect::to("/").into_response();
    }

    next.run(req).await
}
