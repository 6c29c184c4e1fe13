//! Persistence abstraction over todo records.
//!
//! Handlers only ever see the [`TodoStore`] trait, so the backing engine is
//! swappable without touching them. The shipped engine is SQLite via sqlx.

mod sqlite;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::todo::Todo;

pub use sqlite::SqliteStore;

/// CRUD contract over todo records.
///
/// All operations are single statements; no transaction ever spans more than
/// one of them. Conflicting concurrent writes are serialized by the engine.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Persist a new record with `done` forced to `false`, returning it with
    /// the store-assigned id.
    async fn insert(&self, todo: Todo) -> StorageResult<Todo>;

    /// Return every record, in storage order.
    async fn fetch_all(&self) -> StorageResult<Vec<Todo>>;

    /// Replace name/done for the row matching `id`. Returns `false` when no
    /// row matched.
    async fn update(&self, todo: Todo, id: i64) -> StorageResult<bool>;

    /// Remove the row matching `id`. Returns `false` when no row matched.
    async fn delete(&self, id: i64) -> StorageResult<bool>;

    /// Return the row count.
    async fn count_entries(&self) -> StorageResult<i64>;
}
