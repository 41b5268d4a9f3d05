use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{QuoteStore, StoreResult};
use crate::quote::Quote;

/// In-process quote store.
///
/// The lock is held for a single map operation and never across an await.
#[derive(Debug, Default)]
pub struct MemoryStore {
    quotes: RwLock<HashMap<String, Quote>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quotes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.read().is_empty()
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    /// Sorted by id, which for generated ids is creation order.
    async fn list(&self) -> StoreResult<Vec<Quote>> {
        let mut quotes: Vec<Quote> = self.quotes.read().values().cloned().collect();
        quotes.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(quotes)
    }

    async fn put(&self, quote: Quote) -> StoreResult<()> {
        self.quotes.write().insert(quote.id.clone(), quote);
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Quote>> {
        Ok(self.quotes.read().get(id).cloned())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, text: &str) -> Quote {
        Quote { id: id.into(), attributed_to: "Anon".into(), text: text.into() }
    }

    #[tokio::test]
    async fn put_then_get() {
        let store = MemoryStore::new();
        store.put(quote("a", "first")).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(quote("a", "first")));
        assert_eq!(store.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_sorted_by_id() {
        let store = MemoryStore::new();
        for id in ["c", "a", "b"] {
            store.put(quote(id, id)).await.unwrap();
        }

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|q| q.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn put_replaces_same_id() {
        let store = MemoryStore::new();
        store.put(quote("a", "old")).await.unwrap();
        store.put(quote("a", "new")).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").await.unwrap().unwrap().text, "new");
    }
}
