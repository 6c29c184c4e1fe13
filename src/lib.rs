//! Small todo CRUD service: JSON over HTTP, SQLite underneath, Prometheus
//! metrics on a side port.
//!
//! Every response is wrapped in a uniform envelope, every storage call runs
//! under the configured idle timeout, and every request is observed by the
//! metrics sink exactly once.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Storage error types
//! - [`metrics`]: Request counters and duration histogram
//! - [`storage`]: Persistence abstraction and the SQLite engine
//! - [`todo`]: The todo entity
//! - [`api`]: HTTP handlers, middleware, and the response envelope

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod storage;
pub mod todo;

pub use config::Config;
