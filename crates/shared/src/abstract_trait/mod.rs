mod email;
mod hashing;
mod jwt;
mod mail;

pub use self::email::{DynEmailService, EmailServiceTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::mail::{DynMailDispatcher, MailDispatcherTrait};
