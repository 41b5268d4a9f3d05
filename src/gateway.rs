//! Quote store gateway.
//!
//! Turns the three API operations into store calls. Required-field checks
//! happen here, before any I/O; everything the store reports is passed up
//! unchanged for the HTTP layer to render.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::quote::{NewQuote, Quote};
use crate::store::{QuoteStore, StoreError};

/// Message returned when a create request lacks a required field.
pub const REQUIRED_FIELDS: &str = "Required fields: AttributedTo, Text";

/// Failures of a gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// A required field is missing or empty. Caused by the client.
    #[error("{0}")]
    Validation(&'static str),

    /// The request body could not be parsed.
    #[error("{0}")]
    InvalidBody(String),

    /// No quote is stored under the requested id.
    #[error("quote `{0}` not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// List, create and fetch over an injected [`QuoteStore`].
#[derive(Clone)]
pub struct QuoteGateway {
    store: Arc<dyn QuoteStore>,
}

impl QuoteGateway {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Quote>, GatewayError> {
        Ok(self.store.list().await?)
    }

    /// Stores a new quote and returns its generated id.
    pub async fn create(&self, new: NewQuote) -> Result<String, GatewayError> {
        let (attributed_to, text) = new.fields().ok_or(GatewayError::Validation(REQUIRED_FIELDS))?;
        let quote = Quote::new(attributed_to, text);
        let id = quote.id.clone();

        self.store.put(quote).await?;
        debug!(%id, "quote created");
        Ok(id)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Quote, GatewayError> {
        self.store.get(id).await?
            .ok_or_else(|| GatewayError::NotFound(id.to_owned()))
    }
}
