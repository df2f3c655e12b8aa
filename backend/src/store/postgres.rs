use async_trait::async_trait;
use shared::Todo;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};

use super::{StoreError, StoreResult, TodoStore};

const MAX_CONNECTIONS: u32 = 5;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id SERIAL PRIMARY KEY,
    item TEXT NOT NULL,
    completed BOOLEAN NOT NULL
)
"#;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i32,
    item: String,
    completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::new(row.id, row.item, row.completed)
    }
}

#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("todos table ready");
        Ok(())
    }

    async fn list_todos(&self) -> StoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> =
            sqlx::query_as("SELECT id, item, completed FROM todos ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn get_todo(&self, id: i32) -> StoreResult<Todo> {
        let row: Option<TodoRow> =
            sqlx::query_as("SELECT id, item, completed FROM todos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Todo::from).ok_or(StoreError::NotFound { id })
    }

    async fn insert_todo(&self, item: &str, completed: bool) -> StoreResult<Todo> {
        let row: TodoRow = sqlx::query_as(
            "INSERT INTO todos (item, completed) VALUES ($1, $2) RETURNING id, item, completed",
        )
        .bind(item)
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn toggle_completed(&self, id: i32) -> StoreResult<Todo> {
        // Single statement: the read and the write cannot interleave with
        // another toggle on the same row.
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            UPDATE todos
            SET completed = NOT completed
            WHERE id = $1
            RETURNING id, item, completed
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::from).ok_or(StoreError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Run with: DATABASE_URL=postgres://... cargo test -p backend -- --ignored

    async fn store() -> PgTodoStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        let store = PgTodoStore::new(pool);
        store.ensure_schema().await.expect("schema creation failed");
        store
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let store = store().await;
        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_returns_assigned_id() {
        let store = store().await;
        let first = store.insert_todo("Clean Room", false).await.unwrap();
        let second = store.insert_todo("Read Book", true).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(store.get_todo(second.id).await.unwrap(), second);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn toggle_twice_restores_flag() {
        let store = store().await;
        let todo = store.insert_todo("Record Video", false).await.unwrap();

        assert!(store.toggle_completed(todo.id).await.unwrap().completed);
        assert!(!store.toggle_completed(todo.id).await.unwrap().completed);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_row_is_not_found() {
        let store = store().await;
        let err = store.get_todo(i32::MAX).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id } if id == i32::MAX));

        let err = store.toggle_completed(i32::MAX).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
