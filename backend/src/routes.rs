use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use shared::{CreateTodoRequest, Todo};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::store::{StoreError, TodoStore};

pub type Store = Arc<dyn TodoStore>;

pub fn router(store: Store) -> Router {
    Router::new()
        .route("/todos", get(get_todos).post(create_todo))
        .route("/todos/:id", get(get_todo).patch(toggle_todo))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(store)
}

/// Ids are integers; anything else cannot match a row.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

async fn get_todos(State(store): State<Store>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = store.list_todos().await?;
    Ok(Json(todos))
}

async fn get_todo(
    Path(id): Path<String>,
    State(store): State<Store>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let todo = store.get_todo(id).await?;
    Ok(Json(todo))
}

async fn create_todo(
    State(store): State<Store>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    // Decoded whatever the Content-Type header says.
    let payload: CreateTodoRequest = serde_json::from_slice(&body)?;

    let todo = store
        .insert_todo(&payload.item, payload.completed)
        .await
        .map_err(|e| match e {
            StoreError::Database(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        })?;

    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    Path(id): Path<String>,
    State(store): State<Store>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let todo = store.toggle_completed(id).await?;

    tracing::info!(id = todo.id, completed = todo.completed, "todo toggled");
    Ok(Json(todo))
}
