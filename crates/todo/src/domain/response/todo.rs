use crate::model::todo::Todo;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl From<Todo> for TodoResponse {
    fn from(value: Todo) -> Self {
        TodoResponse {
            id: value.todo_id,
            title: value.title,
            description: value.description,
            is_completed: value.is_completed,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

/// Totals over the whole table, whatever filter is applied to the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct TodoCounts {
    pub all_count: i64,
    pub completed_count: i64,
    pub incomplete_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TodoListResponse {
    pub filter: String,
    pub todos: Vec<TodoResponse>,
    pub all_count: i64,
    pub completed_count: i64,
    pub incomplete_count: i64,
}
