use crate::{
    abstract_trait::user::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    domain::requests::user::CreateUserRequest,
    model::user::User as UserModel,
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct UserTable {
    last_id: i32,
    rows: Vec<UserModel>,
}

/// In-process user table with the same uniqueness rules as the `users` schema.
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_by<F>(&self, predicate: F) -> Option<UserModel>
    where
        F: Fn(&UserModel) -> bool,
    {
        self.table
            .read()
            .await
            .rows
            .iter()
            .find(|user| predicate(user))
            .cloned()
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        Ok(self.find_by(|user| user.user_id == id).await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, RepositoryError> {
        Ok(self.find_by(|user| user.username == username).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        Ok(self.find_by(|user| user.email == email).await)
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryUserRepository {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|user| user.username == req.username) {
            return Err(RepositoryError::AlreadyExists("users_username_key".into()));
        }
        if table.rows.iter().any(|user| user.email == req.email) {
            return Err(RepositoryError::AlreadyExists("users_email_key".into()));
        }

        table.last_id += 1;
        let now = Utc::now().naive_utc();

        let user = UserModel {
            user_id: table.last_id,
            username: req.username.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            is_email_verified: false,
            created_at: Some(now),
            updated_at: Some(now),
        };
        table.rows.push(user.clone());

        Ok(user)
    }

    async fn update_is_email_verified(
        &self,
        user_id: i32,
        is_email_verified: bool,
    ) -> Result<UserModel, RepositoryError> {
        let mut table = self.table.write().await;

        let user = table
            .rows
            .iter_mut()
            .find(|user| user.user_id == user_id)
            .ok_or(RepositoryError::NotFound)?;

        user.is_email_verified = is_email_verified;
        user.updated_at = Some(Utc::now().naive_utc());

        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.into(),
            email: email.into(),
            password: "hashed".into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_starts_unverified() {
        let repo = MemoryUserRepository::new();

        let alice = repo.create_user(&request("alice", "alice@example.com")).await.unwrap();
        let bob = repo.create_user(&request("bob", "bob@example.com")).await.unwrap();

        assert_eq!(alice.user_id, 1);
        assert_eq!(bob.user_id, 2);
        assert!(!alice.is_email_verified);
        assert_eq!(
            repo.find_by_email("bob@example.com").await.unwrap().map(|u| u.user_id),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_is_rejected() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&request("alice", "alice@example.com")).await.unwrap();

        assert!(matches!(
            repo.create_user(&request("alice", "other@example.com")).await,
            Err(RepositoryError::AlreadyExists(_))
        ));
        assert!(matches!(
            repo.create_user(&request("other", "alice@example.com")).await,
            Err(RepositoryError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_update_verification_flag() {
        let repo = MemoryUserRepository::new();
        let user = repo.create_user(&request("alice", "alice@example.com")).await.unwrap();

        let updated = repo.update_is_email_verified(user.user_id, true).await.unwrap();
        assert!(updated.is_email_verified);

        assert!(matches!(
            repo.update_is_email_verified(99, true).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
