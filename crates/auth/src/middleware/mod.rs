mod jwt;
mod session;

pub use self::jwt::{auth_middleware, guest_only_middleware};
pub use self::session::{SESSION_COOKIE, SessionCookie};
