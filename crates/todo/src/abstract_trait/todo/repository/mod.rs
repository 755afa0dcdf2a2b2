mod command;
mod query;

pub use self::command::{DynTodoCommandRepository, TodoCommandRepositoryTrait};
pub use self::query::{DynTodoQueryRepository, TodoQueryRepositoryTrait};
