//! Storage adapters for todos.
//!
//! Handlers only see [`TodoStore`]; the binary picks the Postgres or the
//! in-memory implementation at startup.

mod memory;
mod postgres;

use async_trait::async_trait;
use shared::Todo;

pub use memory::MemoryTodoStore;
pub use postgres::{create_pool, PgTodoStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo {id} not found")]
    NotFound { id: i32 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("no todo ids left to assign")]
    IdsExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Create the backing table if it does not exist yet.
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// Every todo, ordered by id. An empty store yields an empty vector.
    async fn list_todos(&self) -> StoreResult<Vec<Todo>>;

    async fn get_todo(&self, id: i32) -> StoreResult<Todo>;

    /// Insert a new todo. The store assigns the id.
    async fn insert_todo(&self, item: &str, completed: bool) -> StoreResult<Todo>;

    /// Invert `completed` on the stored row and return the updated todo.
    ///
    /// A missing id yields [`StoreError::NotFound`] without writing anything.
    async fn toggle_completed(&self, id: i32) -> StoreResult<Todo>;
}
