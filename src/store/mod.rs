//! Quote persistence.
//!
//! [`QuoteStore`] is the seam between the HTTP layer and the document store.
//! Implementations are thin: one backend call per method, no validation, no
//! retries. Validation lives in [`QuoteGateway`](crate::QuoteGateway).
//!
//! | Backend | Feature | Use |
//! |---|---|---|
//! | [`MemoryStore`] | always | tests and local runs |
//! | [`DynamoStore`] | `dynamodb` | production, table [`TABLE_NAME`] |

use async_trait::async_trait;
use thiserror::Error;

use crate::quote::Quote;

mod memory;
#[cfg(feature = "dynamodb")]
mod dynamo;

pub use memory::MemoryStore;
#[cfg(feature = "dynamodb")]
pub use dynamo::DynamoStore;

/// Table holding quote items, keyed by the string attribute `ID`.
pub const TABLE_NAME: &str = "quotes";

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached (connection, dispatch or timeout).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with an error.
    #[error("{0}")]
    Backend(String),

    /// A stored item could not be read back as a quote.
    #[error("malformed item: {0}")]
    Malformed(String),
}

/// A document store holding quotes.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Every stored quote, in backend-defined order.
    async fn list(&self) -> StoreResult<Vec<Quote>>;

    /// Persists `quote` under its id.
    async fn put(&self, quote: Quote) -> StoreResult<()>;

    /// The quote stored under `id`, if any.
    async fn get(&self, id: &str) -> StoreResult<Option<Quote>>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
