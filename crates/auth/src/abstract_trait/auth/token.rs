use crate::model::user::User;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynActivationToken = Arc<dyn ActivationTokenTrait + Send + Sync>;

pub trait ActivationTokenTrait {
    fn make_token(&self, user: &User) -> Result<String, ServiceError>;
    fn check_token(&self, user: &User, token: &str) -> bool;
}
