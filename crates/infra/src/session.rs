//! Pantry session: the single logical writer over a persisted collection.
//!
//! Holds the current [`Pantry`] value and keeps the store in step with it:
//! load on open, prune expired items on refresh, save after every accepted
//! command. All rules live in `expiry-inventory`; this type only sequences
//! them and does IO.

use chrono::NaiveDate;

use expiry_core::{DomainError, DomainResult};
use expiry_inventory::{BoardEntry, Pantry, PantryCommand};

use crate::store::{KeyValueStore, ProductStore, StoreError};

#[derive(Debug)]
pub struct PantrySession<S> {
    store: ProductStore<S>,
    pantry: Pantry,
    durable: bool,
}

impl<S> PantrySession<S>
where
    S: KeyValueStore,
{
    /// Load the stored collection and prune anything already expired.
    ///
    /// A failed or corrupt load starts from an empty pantry.
    pub async fn open(store: ProductStore<S>, today: NaiveDate) -> Self {
        let pantry = match load_pantry(&store).await {
            Ok(pantry) => pantry,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load pantry; starting empty");
                Pantry::new()
            }
        };

        tracing::info!(products = pantry.len(), "pantry loaded");

        let mut session = Self {
            store,
            pantry,
            durable: true,
        };
        session.refresh(today).await;
        session
    }

    pub fn pantry(&self) -> &Pantry {
        &self.pantry
    }

    /// False once a save has failed and not yet been followed by a successful one.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    /// Remove expired items. Writes only when something was removed.
    ///
    /// Returns the number of products pruned.
    pub async fn refresh(&mut self, today: NaiveDate) -> usize {
        let reconciliation = self.pantry.reconcile(today);
        if reconciliation.is_noop() {
            return 0;
        }

        let removed = reconciliation.removed.len();
        for p in &reconciliation.removed {
            tracing::info!(product_id = %p.id_typed(), name = p.name(), expiry = %p.expiry_date(), "pruned expired product");
        }

        self.pantry = reconciliation.pantry;
        self.persist().await;
        removed
    }

    /// Apply a command. On success the new pantry replaces the old one and is saved.
    ///
    /// A rejected command leaves both memory and storage untouched.
    pub async fn execute(&mut self, command: &PantryCommand) -> DomainResult<&Pantry> {
        let next = match self.pantry.execute(command) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(command = command.name(), error = %err, "command rejected");
                return Err(err);
            }
        };

        self.pantry = next;
        tracing::debug!(command = command.name(), products = self.pantry.len(), "command applied");
        self.persist().await;
        Ok(&self.pantry)
    }

    pub fn board(&self, today: NaiveDate) -> Vec<BoardEntry> {
        self.pantry.board(today)
    }

    pub fn expiring_names(&self, today: NaiveDate) -> Vec<String> {
        self.pantry.expiring_names(today)
    }

    /// Single attempt; the in-memory pantry stays authoritative either way.
    async fn persist(&mut self) {
        match self.store.save(self.pantry.products()).await {
            Ok(()) => self.durable = true,
            Err(err) => {
                tracing::error!(error = %err, products = self.pantry.len(), "failed to save pantry");
                self.durable = false;
            }
        }
    }
}

async fn load_pantry<S: KeyValueStore>(store: &ProductStore<S>) -> Result<Pantry, StoreError> {
    let Some(products) = store.load().await? else {
        return Ok(Pantry::new());
    };
    Pantry::from_products(products).map_err(|e: DomainError| StoreError::Corrupt(e.to_string()))
}
