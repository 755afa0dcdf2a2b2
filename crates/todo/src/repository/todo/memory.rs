use crate::{
    abstract_trait::todo::repository::{TodoCommandRepositoryTrait, TodoQueryRepositoryTrait},
    domain::{
        requests::todo::{CreateTodoRequest, TodoFilter, UpdateTodoRequest},
        response::todo::TodoCounts,
    },
    model::todo::Todo as TodoModel,
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct TodoTable {
    last_id: i32,
    rows: Vec<TodoModel>,
}

/// In-process todo table. Rows stay in insertion (id) order.
#[derive(Clone, Default)]
pub struct MemoryTodoRepository {
    table: Arc<RwLock<TodoTable>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoQueryRepositoryTrait for MemoryTodoRepository {
    async fn find_all(&self, filter: TodoFilter) -> Result<Vec<TodoModel>, RepositoryError> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .iter()
            .filter(|todo| {
                filter
                    .completion()
                    .is_none_or(|completed| todo.is_completed == completed)
            })
            .cloned()
            .collect())
    }

    async fn count_by_status(&self) -> Result<TodoCounts, RepositoryError> {
        let table = self.table.read().await;
        let completed = table.rows.iter().filter(|todo| todo.is_completed).count() as i64;
        let all = table.rows.len() as i64;

        Ok(TodoCounts {
            all_count: all,
            completed_count: completed,
            incomplete_count: all - completed,
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TodoModel>, RepositoryError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .iter()
            .find(|todo| todo.todo_id == id)
            .cloned())
    }
}

#[async_trait]
impl TodoCommandRepositoryTrait for MemoryTodoRepository {
    async fn create_todo(&self, req: &CreateTodoRequest) -> Result<TodoModel, RepositoryError> {
        let mut table = self.table.write().await;

        table.last_id += 1;
        let now = Utc::now().naive_utc();

        let todo = TodoModel {
            todo_id: table.last_id,
            title: req.title.clone(),
            description: req.description.clone(),
            is_completed: req.is_completed,
            created_at: Some(now),
            updated_at: Some(now),
        };
        table.rows.push(todo.clone());

        Ok(todo)
    }

    async fn update_todo(&self, req: &UpdateTodoRequest) -> Result<TodoModel, RepositoryError> {
        let mut table = self.table.write().await;

        let todo = table
            .rows
            .iter_mut()
            .find(|todo| todo.todo_id == req.todo_id)
            .ok_or(RepositoryError::NotFound)?;

        todo.title = req.title.clone();
        todo.description = req.description.clone();
        todo.is_completed = req.is_completed;
        todo.updated_at = Some(Utc::now().naive_utc());

        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: i32) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;

        let position = table
            .rows
            .iter()
            .position(|todo| todo.todo_id == id)
            .ok_or(RepositoryError::NotFound)?;
        table.rows.remove(position);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryTodoRepository {
        let repo = MemoryTodoRepository::new();

        for (title, is_completed) in [("a", true), ("b", false), ("c", true)] {
            repo.create_todo(&CreateTodoRequest {
                title: title.into(),
                description: format!("{title} description"),
                is_completed,
            })
            .await
            .unwrap();
        }

        repo
    }

    #[tokio::test]
    async fn test_filters_select_exact_subsets() {
        let repo = seeded().await;

        let titles = |todos: Vec<TodoModel>| -> Vec<String> {
            todos.into_iter().map(|todo| todo.title).collect()
        };

        assert_eq!(titles(repo.find_all(TodoFilter::All).await.unwrap()), ["a", "b", "c"]);
        assert_eq!(titles(repo.find_all(TodoFilter::Complete).await.unwrap()), ["a", "c"]);
        assert_eq!(titles(repo.find_all(TodoFilter::Incomplete).await.unwrap()), ["b"]);

        assert_eq!(
            repo.count_by_status().await.unwrap(),
            TodoCounts {
                all_count: 3,
                completed_count: 2,
                incomplete_count: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let repo = seeded().await;

        let updated = repo
            .update_todo(&UpdateTodoRequest {
                todo_id: 2,
                title: "b2".into(),
                description: "done now".into(),
                is_completed: true,
            })
            .await
            .unwrap();
        assert!(updated.is_completed);
        assert_eq!(repo.count_by_status().await.unwrap().completed_count, 3);

        repo.delete_todo(2).await.unwrap();
        assert!(repo.find_by_id(2).await.unwrap().is_none());
        assert!(matches!(repo.delete_todo(2).await, Err(RepositoryError::NotFound)));
        assert!(matches!(
            repo.update_todo(&UpdateTodoRequest {
                todo_id: 2,
                title: "x".into(),
                description: "y".into(),
                is_completed: false,
            })
            .await,
            Err(RepositoryError::NotFound)
        ));
    }
}
