use crate::{abstract_trait::HashingTrait, errors::ServiceError};
use async_trait::async_trait;
use bcrypt::{hash, verify};

#[derive(Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl HashingTrait for Hashing {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ServiceError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(ServiceError::Bcrypt)
    }

    async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        let password = password.to_owned();
        let hashed_password = hashed_password.to_owned();

        let is_valid = tokio::task::spawn_blocking(move || verify(password, &hashed_password))
            .await
            .map_err(|e| ServiceError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(ServiceError::Bcrypt)?;

        if is_valid {
            Ok(())
        } else {
            Err(ServiceError::InvalidCredentials)
        }
    }
}
