//! Infrastructure layer: persistence backends and the pantry session that
//! ties the pure inventory rules to a store.

pub mod session;
pub mod store;

pub use session::PantrySession;
pub use store::{
    InMemoryKeyValueStore, KeyValueStore, PRODUCTS_KEY, ProductStore, SqliteKeyValueStore,
    StoreError,
};
