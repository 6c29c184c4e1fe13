//! SQLite implementation of the todo store.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::TodoStore;
use crate::error::StorageResult;
use crate::todo::Todo;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    done BOOLEAN NOT NULL DEFAULT FALSE
)";

/// Todo store backed by a SQLite connection pool.
///
/// The schema is ensured idempotently on construction.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if absent) the database at `path` and ensure the
    /// schema exists.
    pub async fn connect(path: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(path)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// In-memory store for tests. A single pooled connection keeps the
    /// database alive for the pool's lifetime.
    pub async fn in_memory() -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> StorageResult<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn insert(&self, todo: Todo) -> StorageResult<Todo> {
        // done is forced false on create regardless of the input value.
        let result = sqlx::query("INSERT INTO todos (name, done) VALUES (?, FALSE)")
            .bind(&todo.name)
            .execute(&self.pool)
            .await?;

        Ok(Todo {
            id: result.last_insert_rowid(),
            name: todo.name,
            done: false,
        })
    }

    async fn fetch_all(&self) -> StorageResult<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>("SELECT id, name, done FROM todos")
            .fetch_all(&self.pool)
            .await?;

        Ok(todos)
    }

    async fn update(&self, todo: Todo, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("UPDATE todos SET name = ?, done = ? WHERE id = ?")
            .bind(&todo.name)
            .bind(todo.done)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_entries(&self) -> StorageResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
