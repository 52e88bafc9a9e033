use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoPort;
use crate::routing_utils::{BasicErrorResponse, Json, TodoErrorResponse};
use crate::{AppState, SharedData, domain, dto};
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::get;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_todos, get_todo, create_todo, delete_todo))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Builds a router for all the todo routes
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/api/todos",
            get(
                |State(app_state): AppState,
                 Query(params): Query<HashMap<String, String>>| async move {
                    let todo_service = domain::todo::TodoService {};
                    let todo_reader = app_state.ext_cxn.todo_reader();

                    list_todos(params, &todo_service, &todo_reader).await
                },
            )
            .post(
                |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
                    let todo_service = domain::todo::TodoService {};
                    let todo_writer = app_state.ext_cxn.todo_writer();

                    create_todo(new_todo, &todo_service, &todo_writer).await
                },
            ),
        )
        .route(
            "/api/todos/:todo_id",
            get(
                |State(app_state): AppState, Path(todo_id): Path<String>| async move {
                    let todo_service = domain::todo::TodoService {};
                    let todo_reader = app_state.ext_cxn.todo_reader();

                    get_todo(todo_id, &todo_service, &todo_reader).await
                },
            )
            .delete(
                |State(app_state): AppState, Path(todo_id): Path<String>| async move {
                    let todo_service = domain::todo::TodoService {};
                    let todo_writer = app_state.ext_cxn.todo_writer();

                    delete_todo(todo_id, &todo_service, &todo_writer).await
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = TODO_API_GROUP,
    params(
        ("status" = Option<bool>, Query, description = "Only return todos with this status"),
        ("owner" = Option<String>, Query, description = "Only return todos whose owner contains this text, ignoring case"),
        ("category" = Option<String>, Query, description = "Only return todos whose category contains this text, ignoring case"),
        ("body" = Option<String>, Query, description = "Only return todos whose body contains this text, ignoring case"),
        ("sortby" = Option<String>, Query, description = "Field to sort the todos by. Defaults to \"name\""),
        ("sortorder" = Option<String>, Query, description = "\"desc\" sorts descending, anything else sorts ascending"),
    ),
    responses(
        (status = 200, description = "Every todo matching all of the filters", body = [dto::Todo]),
        (status = 400, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Retrieves the todos matching a set of filters
async fn list_todos(
    params: HashMap<String, String>,
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
) -> Result<Json<Vec<dto::Todo>>, ErrorResponse> {
    info!("Listing todos with query {params:?}");
    let todos = todo_service
        .list_todos(&params, todo_read)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(todos.into_iter().map(dto::Todo::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = String, Path, description = "ID of the todo to fetch"),
    ),
    responses(
        (status = 200, description = "The requested todo", body = dto::Todo),
        (status = 400, response = BasicErrorResponse),
        (status = 404, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Retrieves a single todo
async fn get_todo(
    todo_id: String,
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
) -> Result<Json<dto::Todo>, ErrorResponse> {
    info!("Get todo {todo_id}");
    let todo = todo_service
        .todo_by_id(&todo_id, todo_read)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::Todo::from(todo)))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 200, description = "The todo was stored", body = dto::InsertedTodo),
        (status = 400, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Creates a todo
async fn create_todo(
    new_todo: dto::NewTodo,
    todo_service: &impl TodoPort,
    todo_write: &impl TodoWriter,
) -> Result<Json<dto::InsertedTodo>, ErrorResponse> {
    info!("Attempt to create a todo");
    let created_id = todo_service
        .create_todo(new_todo.into(), todo_write)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::InsertedTodo {
        id: created_id.to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = String, Path, description = "ID of the todo to delete"),
    ),
    responses(
        (status = 200, description = "The todo no longer exists, whether or not it did before"),
        (status = 400, response = BasicErrorResponse),
        (status = 500, response = BasicErrorResponse),
    ),
)]
/// Deletes a todo. Deleting a todo that doesn't exist succeeds.
async fn delete_todo(
    todo_id: String,
    todo_service: &impl TodoPort,
    todo_write: &impl TodoWriter,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    todo_service
        .delete_todo(&todo_id, todo_write)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(StatusCode::OK)
}
