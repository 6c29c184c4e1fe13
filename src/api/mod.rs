//! HTTP API: handlers, middleware, routes, and the response envelope.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
