//! Inventory classifier & reconciler.
//!
//! This crate contains the expiry rules for a household pantry, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage, no clock).
//! "Today" is always passed in by the caller.

pub mod pantry;
pub mod product;
pub mod urgency;

pub use pantry::{BoardEntry, Pantry, PantryCommand, Reconciliation};
pub use product::{FormNumber, Product, ProductDraft, Unit};
pub use urgency::{Urgency, classify, days_until};
