pub mod activation;
pub mod identity;
pub mod login;
pub mod register;
pub mod token;

pub use self::activation::{ActivationServiceTrait, DynActivationService};
pub use self::identity::{DynIdentityService, IdentityServiceTrait};
pub use self::login::{DynLoginService, LoginServiceTrait};
pub use self::register::{DynRegisterService, RegisterServiceTrait};
pub use self::token::{ActivationTokenTrait, DynActivationToken};
