use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    /// Owning user. Carried on the wire only; never stored or queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    pub item: String,
    pub completed: bool,
}

/// Body of `POST /todos`. Any `id` the client sends is ignored, and missing
/// fields take their zero values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn new(id: i32, item: String, completed: bool) -> Self {
        Self {
            id,
            user_id: None,
            item,
            completed,
        }
    }

    pub fn toggled(mut self) -> Self {
        self.completed = !self.completed;
        self
    }
}
