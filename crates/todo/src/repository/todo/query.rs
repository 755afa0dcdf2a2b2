use crate::{
    abstract_trait::todo::repository::TodoQueryRepositoryTrait,
    domain::{requests::todo::TodoFilter, response::todo::TodoCounts},
    model::todo::Todo as TodoModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct TodoQueryRepository {
    db: ConnectionPool,
}

impl TodoQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoQueryRepositoryTrait for TodoQueryRepository {
    async fn find_all(&self, filter: TodoFilter) -> Result<Vec<TodoModel>, RepositoryError> {
        info!("🔍 Fetching todos with filter: {}", filter.as_str());

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let todos = sqlx::query_as::<_, TodoModel>(
            r#"
            SELECT todo_id, title, description, is_completed, created_at, updated_at
            FROM todos
            WHERE $1::BOOLEAN IS NULL OR is_completed = $1
            ORDER BY todo_id
            "#,
        )
        .bind(filter.completion())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch todos: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(todos)
    }

    async fn count_by_status(&self) -> Result<TodoCounts, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let counts = sqlx::query_as::<_, TodoCounts>(
            r#"
            SELECT
                COUNT(*) AS all_count,
                COUNT(*) FILTER (WHERE is_completed) AS completed_count,
                COUNT(*) FILTER (WHERE NOT is_completed) AS incomplete_count
            FROM todos
            "#,
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to count todos: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(counts)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TodoModel>, RepositoryError> {
        info!("🆔 Fetching todo by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let todo = sqlx::query_as::<_, TodoModel>(
            r#"
            SELECT todo_id, title, description, is_completed, created_at, updated_at
            FROM todos
            WHERE todo_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch todo {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(todo)
    }
}
