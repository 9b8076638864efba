//! Key-value persistence for the product collection.
//!
//! The collection is the unit of persistence: it is read once when a session
//! opens and rewritten in full after every accepted change.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub mod in_memory;
pub mod products;
pub mod sqlite;

pub use in_memory::InMemoryKeyValueStore;
pub use products::{PRODUCTS_KEY, ProductStore};
pub use sqlite::SqliteKeyValueStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("stored data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored data violates collection invariants: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        StoreError::Backend(value.to_string())
    }
}

/// Byte-oriented key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(key, value).await
    }
}
