pub mod todo;

use crate::domain::{
    requests::todo::TodoForm,
    response::todo::{TodoListResponse, TodoResponse},
};
use shared::errors::ErrorResponse;
use utoipa::OpenApi;

pub use self::todo::todo_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        todo::get_todos,
        todo::create_todo,
        todo::get_todo,
        todo::edit_todo_form,
        todo::update_todo,
        todo::delete_todo,
    ),
    components(schemas(
        TodoForm,
        TodoResponse,
        TodoListResponse,
        ErrorResponse,
    )),
    tags((name = "Todo", description = "Todo list endpoints"))
)]
pub struct TodoApiDoc;
