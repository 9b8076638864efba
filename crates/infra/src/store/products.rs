use expiry_inventory::Product;

use super::{KeyValueStore, StoreError};

/// Key under which the whole collection is stored.
pub const PRODUCTS_KEY: &str = "products";

/// The product collection as a JSON array under [`PRODUCTS_KEY`].
#[derive(Debug, Clone)]
pub struct ProductStore<S> {
    kv: S,
}

impl<S> ProductStore<S>
where
    S: KeyValueStore,
{
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<Vec<Product>>, StoreError> {
        match self.kv.get(PRODUCTS_KEY).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(products)?;
        self.kv.put(PRODUCTS_KEY, bytes).await
    }
}
