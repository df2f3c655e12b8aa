//! HTTP service for a single table of todos.
//!
//! `GET /todos`, `GET /todos/:id`, `POST /todos` and `PATCH /todos/:id`
//! (toggle `completed`), backed by Postgres or an in-memory store.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

pub use config::{Config, Storage};
pub use routes::{router, Store};
