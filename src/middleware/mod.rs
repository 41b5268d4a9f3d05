//! Middleware layer.
//!
//! Middleware sees every request before it reaches the router. The server
//! runs each layer in order ahead of [`Router::dispatch`](crate::Router::dispatch).
//!
//! Built-in middleware:
//! - [`trace`]: one access-log line per request

pub mod trace;
