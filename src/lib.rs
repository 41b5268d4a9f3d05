//! # quotes
//!
//! A small HTTP service that stores attributed quotes in a document store
//! and serves them back as JSON.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/quotes` | 200, JSON array of quotes | 500 on store error |
//! | PUT | `/quotes` | 201, `Location: /quotes/{id}` | 400 missing field, 500 store error |
//! | GET | `/quotes/{id}` | 200, JSON quote | 404 (no body), 500 store error |
//! | GET | `/` | 200, `{"Hostname": …}` | — |
//!
//! Every request is logged once by [`middleware::trace`]; every failure is
//! rendered by [`ApiError`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quotes::{MemoryStore, QuotesApp, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = QuotesApp::router(Arc::new(MemoryStore::new()));
//!     Server::bind(([127, 0, 0, 1], 8080).into()).serve(app).await.unwrap();
//! }
//! ```

mod error;
mod gateway;
mod handler;
mod method;
mod quote;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod config;
pub mod middleware;
pub mod store;

pub use app::{ApiError, QuotesApp};
pub use config::{Backend, Config};
pub use error::Error;
pub use gateway::{GatewayError, QuoteGateway, REQUIRED_FIELDS};
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use quote::{NewQuote, Quote};
pub use request::{Request, RequestBuilder};
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{MemoryStore, QuoteStore, StoreError, StoreResult};
#[cfg(feature = "dynamodb")]
pub use store::DynamoStore;
