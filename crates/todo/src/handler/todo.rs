use crate::{
    abstract_trait::todo::service::{DynTodoCommandService, DynTodoQueryService},
    di::DependenciesInject,
    domain::{
        requests::todo::{CreateTodoRequest, FindAllTodos, TodoForm, UpdateTodoRequest},
        response::todo::{TodoListResponse, TodoResponse},
    },
};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use shared::{
    domain::responses::ApiResponse,
    errors::{ErrorResponse, HttpError},
    middleware::ValidatedForm,
};
use utoipa_axum::router::OpenApiRouter;

fn detail_path(id: i32) -> String {
    format!("/todo-detail/{id}/")
}

#[utoipa::path(
    get,
    path = "/",
    params(FindAllTodos),
    responses(
        (status = 200, description = "Filtered todos with totals", body = ApiResponse<TodoListResponse>)
    ),
    tag = "Todo",
)]
pub async fn get_todos(
    Extension(service): Extension<DynTodoQueryService>,
    Query(params): Query<FindAllTodos>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/create-todo/",
    request_body(content = TodoForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirects to the detail view"),
        (status = 400, description = "Missing title or description", body = ErrorResponse)
    ),
    tag = "Todo",
)]
pub async fn create_todo(
    Extension(service): Extension<DynTodoCommandService>,
    ValidatedForm(form): ValidatedForm<TodoForm>,
) -> Result<Redirect, HttpError> {
    let response = service.create(&CreateTodoRequest::from(form)).await?;
    Ok(Redirect::to(&detail_path(response.data.id)))
}

#[utoipa::path(
    get,
    path = "/todo-detail/{id}/",
    params(("id" = i32, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Todo details", body = ApiResponse<TodoResponse>),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todo",
)]
pub async fn get_todo(
    Extension(service): Extension<DynTodoQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/todo-edit/{id}/",
    params(("id" = i32, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Current values for the edit form", body = ApiResponse<TodoResponse>),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todo",
)]
pub async fn edit_todo_form(
    Extension(service): Extension<DynTodoQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/todo-edit/{id}/",
    params(("id" = i32, Path, description = "Todo ID")),
    request_body(content = TodoForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirects to the detail view"),
        (status = 400, description = "Missing title or description", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todo",
)]
pub async fn update_todo(
    Extension(service): Extension<DynTodoCommandService>,
    Path(id): Path<i32>,
    ValidatedForm(form): ValidatedForm<TodoForm>,
) -> Result<Redirect, HttpError> {
    let response = service
        .update(&UpdateTodoRequest::from_form(id, form))
        .await?;
    Ok(Redirect::to(&detail_path(response.data.id)))
}

#[utoipa::path(
    post,
    path = "/todo-delete/{id}/",
    params(("id" = i32, Path, description = "Todo ID")),
    responses(
        (status = 303, description = "Deleted, redirects to the list"),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todo",
)]
pub async fn delete_todo(
    Extension(service): Extension<DynTodoCommandService>,
    Path(id): Path<i32>,
) -> Result<Redirect, HttpError> {
    service.delete(id).await?;
    Ok(Redirect::to("/"))
}

pub fn todo_routes(di: &DependenciesInject) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(get_todos))
        .route("/create-todo/", post(create_todo))
        .route("/todo-detail/{id}/", get(get_todo))
        .route("/todo-edit/{id}/", get(edit_todo_form).post(update_todo))
        .route("/todo-delete/{id}/", post(delete_todo))
        .layer(Extension(di.todo_query.clone()))
        .layer(Extension(di.todo_command.clone()))
}
