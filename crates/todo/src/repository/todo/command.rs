use crate::{
    abstract_trait::todo::repository::TodoCommandRepositoryTrait,
    domain::requests::todo::{CreateTodoRequest, UpdateTodoRequest},
    model::todo::Todo as TodoModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct TodoCommandRepository {
    db: ConnectionPool,
}

impl TodoCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoCommandRepositoryTrait for TodoCommandRepository {
    async fn create_todo(&self, req: &CreateTodoRequest) -> Result<TodoModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let todo = sqlx::query_as::<_, TodoModel>(
            r#"
            INSERT INTO todos (title, description, is_completed, created_at, updated_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING todo_id, title, description, is_completed, created_at, updated_at
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.is_completed)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create todo: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created todo with ID {}", todo.todo_id);

        Ok(todo)
    }

    async fn update_todo(&self, req: &UpdateTodoRequest) -> Result<TodoModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // RowNotFound maps to RepositoryError::NotFound
        let todo = sqlx::query_as::<_, TodoModel>(
            r#"
            UPDATE todos
            SET title = $2,
                description = $3,
                is_completed = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE todo_id = $1
            RETURNING todo_id, title, description, is_completed, created_at, updated_at
            "#,
        )
        .bind(req.todo_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.is_completed)
        .fetch_one(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(todo)
    }

    async fn delete_todo(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM todos WHERE todo_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete todo {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted todo with ID {}", id);

        Ok(())
    }
}
