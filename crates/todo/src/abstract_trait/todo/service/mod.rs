mod command;
mod query;

pub use self::command::{DynTodoCommandService, TodoCommandServiceTrait};
pub use self::query::{DynTodoQueryService, TodoQueryServiceTrait};
