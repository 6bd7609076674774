//! Todo endpoints.
//!
//! Two resources: the `/todos` collection and the `/todos/{todo_id}` item.

use crate::{
    config::ListFormat,
    error::{ApiError, ApiResult, ErrorResponse},
    extractors::ValidatedJson,
    responses::{Created, NoContent},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use indexmap::IndexMap;
use restful_todo_domain::{NewTodo, Todo, TodoId, TodoPatch};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

/// Todo model object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoModel {
    /// Task text
    pub task: String,

    /// Optional comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<Todo> for TodoModel {
    fn from(todo: Todo) -> Self {
        Self {
            task: todo.task,
            comment: todo.comment,
        }
    }
}

/// Todo as it appears in a list-shaped listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoListItem {
    /// Todo identifier
    pub id: String,

    /// Task text
    pub task: String,

    /// Optional comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<Todo> for TodoListItem {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.into_inner(),
            task: todo.task,
            comment: todo.comment,
        }
    }
}

/// Body of `GET /todos`, shaped by [`ListFormat`]
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TodoListing {
    /// `{"todo1": {...}, ...}`
    Map(IndexMap<TodoId, TodoModel>),

    /// `[{"id": "todo1", ...}, ...]`
    List(Vec<TodoListItem>),
}

impl TodoListing {
    fn build(format: ListFormat, todos: Vec<Todo>) -> Self {
        match format {
            ListFormat::Map => Self::Map(
                todos
                    .into_iter()
                    .map(|t| (t.id.clone(), TodoModel::from(t)))
                    .collect(),
            ),
            ListFormat::List => Self::List(todos.into_iter().map(Into::into).collect()),
        }
    }
}

/// Create todo request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    /// Task text, required
    ///
    /// A missing `task` deserializes as empty so it fails validation with the
    /// same message as an empty one.
    #[serde(default)]
    #[validate(length(min = 1, message = "Task text is required."))]
    pub task: String,

    /// Optional comment
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            task: req.task,
            comment: req.comment,
        }
    }
}

/// Update todo request
///
/// Empty strings are treated like absent fields.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    /// Replacement task text
    #[serde(default)]
    pub task: Option<String>,

    /// Replacement comment
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            task: req.task,
            comment: req.comment,
        }
    }
}

/// Todo routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:todo_id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

/// Location of a single todo
pub fn todo_location(id: &TodoId) -> String {
    format!("/todos/{}", id)
}

/// Retrieve the list of all todo items
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todo_list",
    operation_id = "getAll",
    responses(
        (status = 200, description = "OK.")
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<TodoListing>> {
    let todos = state.todos.list().await?;
    Ok(Json(TodoListing::build(state.config.list_format, todos)))
}

/// Create a new todo item
///
/// Returns a redirect to the URL of the new todo item.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todo_list",
    operation_id = "create",
    request_body(content = CreateTodoRequest, description = "Todo schema"),
    responses(
        (status = 201, description = "Created.",
            headers(("Location" = String, description = "URL of the new todo"))),
        (status = 400, description = "Invalid request body.", body = ErrorResponse),
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTodoRequest>,
) -> ApiResult<Created> {
    let todo = state.todos.create(req.into()).await?;

    info!(todo_id = %todo.id, "Created todo");

    Ok(Created::at(todo_location(&todo.id)))
}

/// Get a todo
///
/// Return the todo item with id `todo_id`.
#[utoipa::path(
    get,
    path = "/todos/{todo_id}",
    tag = "todo",
    operation_id = "get",
    params(
        ("todo_id" = String, Path, description = "Todo identifier"),
    ),
    responses(
        (status = 200, description = "Retrieved.", body = TodoModel),
        (status = 404, description = "Todo doesn't exist.", body = ErrorResponse),
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> ApiResult<Json<TodoModel>> {
    let todo = state.todos.get(&TodoId::from(todo_id)).await?;
    Ok(Json(todo.into()))
}

/// Update a todo task
///
/// Please make sure the todo `todo_id` already exists. Changing the id is forbidden.
#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = "todo",
    operation_id = "update",
    params(
        ("todo_id" = String, Path, description = "Todo identifier"),
    ),
    request_body(content = UpdateTodoRequest, description = "Text of todo item"),
    responses(
        (status = 204, description = "Updated."),
        (status = 400, description = "Invalid request body.", body = ErrorResponse),
        (status = 404, description = "Todo doesn't exist.", body = ErrorResponse),
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
    body: Result<ValidatedJson<UpdateTodoRequest>, ApiError>,
) -> ApiResult<NoContent> {
    let todo_id = TodoId::from(todo_id);

    // An unknown id is reported before any problem with the body
    state.todos.get(&todo_id).await?;
    let ValidatedJson(req) = body?;

    state.todos.update(&todo_id, req.into()).await?;
    Ok(NoContent)
}

/// Delete a todo item
#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = "todo",
    operation_id = "delete",
    params(
        ("todo_id" = String, Path, description = "Todo identifier"),
    ),
    responses(
        (status = 204, description = "Deleted."),
        (status = 404, description = "Todo doesn't exist.", body = ErrorResponse),
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> ApiResult<NoContent> {
    let todo_id = TodoId::from(todo_id);
    state.todos.delete(&todo_id).await?;

    info!(todo_id = %todo_id, "Deleted todo");

    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos() -> Vec<Todo> {
        vec![
            Todo {
                id: TodoId::from_sequence(1),
                task: "abc".into(),
                comment: None,
            },
            Todo {
                id: TodoId::from_sequence(2),
                task: "def".into(),
                comment: Some("later".into()),
            },
        ]
    }

    #[test]
    fn test_map_listing_shape() {
        let listing = TodoListing::build(ListFormat::Map, todos());
        assert_eq!(
            serde_json::to_value(listing).unwrap(),
            serde_json::json!({
                "todo1": {"task": "abc"},
                "todo2": {"task": "def", "comment": "later"},
            })
        );
    }

    #[test]
    fn test_list_listing_shape() {
        let listing = TodoListing::build(ListFormat::List, todos());
        assert_eq!(
            serde_json::to_value(listing).unwrap(),
            serde_json::json!([
                {"id": "todo1", "task": "abc"},
                {"id": "todo2", "task": "def", "comment": "later"},
            ])
        );
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let result: Result<UpdateTodoRequest, _> =
            serde_json::from_str(r#"{"bogus": "bogus"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_request_missing_task_fails_validation() {
        let req: CreateTodoRequest = serde_json::from_str(r#"{"comment": "soon"}"#).unwrap();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("Task text is required."));
    }

    #[test]
    fn test_location() {
        assert_eq!(todo_location(&TodoId::from_sequence(3)), "/todos/todo3");
    }
}
