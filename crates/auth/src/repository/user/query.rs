use crate::{abstract_trait::user::UserQueryRepositoryTrait, model::user::User as UserModel};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
        info!("🆔 Fetching user by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT user_id, username, email, password, is_email_verified,
                   created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch user by id {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, RepositoryError> {
        info!("👤 Fetching user by username: {}", username);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT user_id, username, email, password, is_email_verified,
                   created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch user by username {}: {:?}", username, e);
            RepositoryError::from(e)
        })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        info!("📧 Fetching user by email: {}", email);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT user_id, username, email, password, is_email_verified,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch user by email {}: {:?}", email, e);
            RepositoryError::from(e)
        })?;

        Ok(user)
    }
}
