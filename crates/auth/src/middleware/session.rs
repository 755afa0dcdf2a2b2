use axum_extra::extract::cookie::{Cookie, SameSite};

pub const SESSION_COOKIE: &str = "token";

/// Shape of the session cookie carrying the access token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookie {
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn issue(&self, access_token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, access_token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    /// Matches the path of [`Self::issue`] so browsers drop the right cookie.
    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE).path("/").build()
    }
}
