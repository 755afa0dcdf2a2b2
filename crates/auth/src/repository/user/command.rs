use crate::{
    abstract_trait::user::UserCommandRepositoryTrait,
    domain::requests::user::CreateUserRequest, model::user::User as UserModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (
                username,
                email,
                password,
                is_email_verified,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, FALSE, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING
                user_id,
                username,
                email,
                password,
                is_email_verified,
                created_at,
                updated_at
            "#,
        )
        .bind(&req.username)
        .bind(&req.email)
        .bind(&req.password)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create user {}: {:?}", req.username, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created user {} with ID {}", user.username, user.user_id);

        Ok(user)
    }

    async fn update_is_email_verified(
        &self,
        user_id: i32,
        is_email_verified: bool,
    ) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET is_email_verified = $2,
                updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING
                user_id,
                username,
                email,
                password,
                is_email_verified,
                created_at,
                updated_at
            "#,
        )
        .bind(user_id)
        .bind(is_email_verified)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(user)
    }
}
