//! The quotes HTTP application.
//!
//! [`QuotesApp::router`] wires an injected store into a [`Router`]:
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/quotes` | [`handlers::list_quotes`] |
//! | PUT | `/quotes` | [`handlers::create_quote`] |
//! | GET | `/quotes/{id}` | [`handlers::get_quote`] |
//! | GET | `/` | [`handlers::hostname`] |
//! | GET | `/healthz` | [`health::liveness`] |
//! | GET | `/readyz` | [`health::readiness`] |
//!
//! There is no delete route.

use std::sync::Arc;

use crate::gateway::QuoteGateway;
use crate::router::Router;
use crate::store::QuoteStore;

pub mod error;
pub mod handlers;
pub mod health;

pub use error::ApiError;

pub struct QuotesApp;

impl QuotesApp {
    /// Builds the router. Every handler shares `store`.
    pub fn router(store: Arc<dyn QuoteStore>) -> Router {
        let gateway = QuoteGateway::new(Arc::clone(&store));

        let list = gateway.clone();
        let create = gateway.clone();
        let fetch = gateway;

        Router::new()
            .get("/quotes", move |req| handlers::list_quotes(list.clone(), req))
            .put("/quotes", move |req| handlers::create_quote(create.clone(), req))
            .get("/quotes/{id}", move |req| handlers::get_quote(fetch.clone(), req))
            .get("/", handlers::hostname)
            .get("/healthz", health::liveness)
            .get("/readyz", move |req| health::readiness(Arc::clone(&store), req))
    }
}
