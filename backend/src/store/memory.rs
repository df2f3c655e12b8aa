use std::collections::BTreeMap;

use async_trait::async_trait;
use shared::Todo;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, TodoStore};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i32,
    todos: BTreeMap<i32, Todo>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_todos(&self) -> StoreResult<Vec<Todo>> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn get_todo(&self, id: i32) -> StoreResult<Todo> {
        let inner = self.inner.read().await;
        inner
            .todos
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn insert_todo(&self, item: &str, completed: bool) -> StoreResult<Todo> {
        let mut inner = self.inner.write().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        inner.last_id = id;
        let todo = Todo::new(id, item.to_owned(), completed);
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn toggle_completed(&self, id: i32) -> StoreResult<Todo> {
        let mut inner = self.inner.write().await;
        let todo = inner
            .todos
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })?
            .toggled();
        inner.todos.insert(id, todo.clone());
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MemoryTodoStore::new();
        assert!(store.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let store = MemoryTodoStore::new();
        let a = store.insert_todo("Clean Room", false).await.unwrap();
        let b = store.insert_todo("Read Book", true).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.list_todos().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn toggle_missing_id_writes_nothing() {
        let store = MemoryTodoStore::new();
        let todo = store.insert_todo("Record Video", false).await.unwrap();

        let err = store.toggle_completed(9999).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 9999 }));
        assert_eq!(store.list_todos().await.unwrap(), vec![todo]);
    }

    #[tokio::test]
    async fn insert_fails_once_ids_run_out() {
        let store = MemoryTodoStore::new();
        store.inner.write().await.last_id = i32::MAX;

        let err = store.insert_todo("Clean Room", false).await.unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted));
        assert!(store.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_flips_stored_value() {
        let store = MemoryTodoStore::new();
        let todo = store.insert_todo("Clean Room", false).await.unwrap();

        let toggled = store.toggle_completed(todo.id).await.unwrap();
        assert!(toggled.completed);
        assert_eq!(store.get_todo(todo.id).await.unwrap(), toggled);
    }
}
