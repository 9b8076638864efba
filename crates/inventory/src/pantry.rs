use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use expiry_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{Product, ProductDraft};
use crate::urgency::Urgency;

/// The household's active product collection.
///
/// Every operation is a pure transform: it borrows the current pantry and
/// returns the next one, leaving the input untouched. Insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Pantry {
    products: Vec<Product>,
}

/// A mutation request against a pantry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PantryCommand {
    Add { draft: ProductDraft },
    Increment { id: ProductId },
    Decrement { id: ProductId },
    Consume { id: ProductId },
}

impl PantryCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PantryCommand::Add { .. } => "add",
            PantryCommand::Increment { .. } => "increment",
            PantryCommand::Decrement { .. } => "decrement",
            PantryCommand::Consume { .. } => "consume",
        }
    }
}

/// Result of pruning expired products.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub pantry: Pantry,
    pub removed: Vec<Product>,
}

impl Reconciliation {
    /// True when nothing was pruned (callers should skip persisting).
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// One product as shown on the board: the record plus its urgency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    #[serde(flatten)]
    pub product: Product,
    pub urgency: Urgency,
    pub days_left: i64,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pantry from stored records, checking collection invariants.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(*p.id()) {
                return Err(DomainError::invariant(format!("duplicate product id {}", p.id())));
            }
            if p.quantity() == 0 {
                return Err(DomainError::invariant(format!(
                    "product {} has zero quantity",
                    p.id()
                )));
            }
            if p.name().trim().is_empty() {
                return Err(DomainError::invariant(format!("product {} has an empty name", p.id())));
            }
            if !p.price().is_finite() || p.price() < 0.0 {
                return Err(DomainError::invariant(format!(
                    "product {} has an invalid price",
                    p.id()
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Drop every product whose expiry date is strictly before `today`.
    pub fn reconcile(&self, today: NaiveDate) -> Reconciliation {
        let (removed, kept): (Vec<Product>, Vec<Product>) = self
            .products
            .iter()
            .cloned()
            .partition(|p| p.is_expired(today));
        Reconciliation {
            pantry: Self { products: kept },
            removed,
        }
    }

    /// Validate `draft` and append it under a freshly generated id.
    pub fn add(&self, draft: &ProductDraft) -> DomainResult<Self> {
        self.add_with_id(draft, ProductId::new())
    }

    /// Like [`Pantry::add`] but with a caller-chosen id.
    pub fn add_with_id(&self, draft: &ProductDraft, id: ProductId) -> DomainResult<Self> {
        if self.contains(&id) {
            return Err(DomainError::conflict(format!("product id {id} already exists")));
        }
        let product = Product::from_draft(id, draft)?;
        let mut products = self.products.clone();
        products.push(product);
        Ok(Self { products })
    }

    pub fn increment(&self, id: &ProductId) -> DomainResult<Self> {
        let product = self.get(id).ok_or_else(DomainError::not_found)?;
        let quantity = product
            .quantity()
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("quantity overflow"))?;
        Ok(self.replace(id, Some(product.with_quantity(quantity))))
    }

    /// Reduce by one; a product that would reach zero is removed.
    pub fn decrement(&self, id: &ProductId) -> DomainResult<Self> {
        let product = self.get(id).ok_or_else(DomainError::not_found)?;
        let next = match product.quantity().saturating_sub(1) {
            0 => None,
            quantity => Some(product.with_quantity(quantity)),
        };
        Ok(self.replace(id, next))
    }

    /// Remove the product regardless of its quantity.
    pub fn consume(&self, id: &ProductId) -> DomainResult<Self> {
        if !self.contains(id) {
            return Err(DomainError::not_found());
        }
        Ok(self.replace(id, None))
    }

    pub fn execute(&self, command: &PantryCommand) -> DomainResult<Self> {
        match command {
            PantryCommand::Add { draft } => self.add(draft),
            PantryCommand::Increment { id } => self.increment(id),
            PantryCommand::Decrement { id } => self.decrement(id),
            PantryCommand::Consume { id } => self.consume(id),
        }
    }

    /// Every product with its urgency, in collection order.
    pub fn board(&self, today: NaiveDate) -> Vec<BoardEntry> {
        self.products
            .iter()
            .map(|p| BoardEntry {
                product: p.clone(),
                urgency: p.urgency(today),
                days_left: p.days_left(today),
            })
            .collect()
    }

    /// Names of products classified `URGENT` or `SOON`.
    pub fn expiring_names(&self, today: NaiveDate) -> Vec<String> {
        self.products
            .iter()
            .filter(|p| p.urgency(today).is_expiring())
            .map(|p| p.name().to_string())
            .collect()
    }

    fn replace(&self, id: &ProductId, next: Option<Product>) -> Self {
        let mut next = next;
        let products = self
            .products
            .iter()
            .filter_map(|p| if p.id() == id { next.take() } else { Some(p.clone()) })
            .collect();
        Self { products }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Unit;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn in_days(offset: i64) -> NaiveDate {
        today() + chrono::Duration::days(offset)
    }

    fn with(pantry: &Pantry, name: &str, quantity: u32, offset: i64) -> (Pantry, ProductId) {
        let id = ProductId::new();
        let next = pantry
            .add_with_id(&ProductDraft::new(name, quantity, in_days(offset)), id)
            .unwrap();
        (next, id)
    }

    #[test]
    fn add_appends_with_defaults() {
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        let draft = ProductDraft::new("Milk", 2u32, tomorrow).with_unit(Unit::Litre);

        let pantry = Pantry::new().add(&draft).unwrap();

        assert_eq!(pantry.len(), 1);
        let milk = &pantry.products()[0];
        assert_eq!(milk.name(), "Milk");
        assert_eq!(milk.quantity(), 2);
        assert_eq!(milk.unit(), Unit::Litre);
        assert_eq!(milk.price(), 0.0);
        assert_eq!(milk.expiry_date(), tomorrow);
    }

    #[test]
    fn adding_same_draft_twice_gives_distinct_ids() {
        let draft = ProductDraft::new("Milk", 2u32, in_days(1));
        let pantry = Pantry::new().add(&draft).unwrap().add(&draft).unwrap();

        assert_eq!(pantry.len(), 2);
        assert_ne!(pantry.products()[0].id(), pantry.products()[1].id());
    }

    #[test]
    fn rejected_add_leaves_pantry_unchanged() {
        let (pantry, _) = with(&Pantry::new(), "Rice", 1, 10);

        let zero = ProductDraft::new("Milk", 0u32, in_days(1));
        assert!(pantry.add(&zero).unwrap_err().is_validation());

        let no_expiry = ProductDraft {
            expiry_date: None,
            ..ProductDraft::new("Milk", 1u32, in_days(1))
        };
        assert!(pantry.add(&no_expiry).unwrap_err().is_validation());

        assert_eq!(pantry.len(), 1);
    }

    #[test]
    fn add_with_existing_id_conflicts() {
        let (pantry, id) = with(&Pantry::new(), "Rice", 1, 10);
        let err = pantry
            .add_with_id(&ProductDraft::new("Beans", 1u32, in_days(3)), id)
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn reconcile_drops_only_past_items() {
        let (p, _) = with(&Pantry::new(), "Bread", 1, -1);
        let (p, _) = with(&p, "Yogurt", 1, 0);
        let (p, _) = with(&p, "Rice", 1, 10);

        let r = p.reconcile(today());

        let names: Vec<_> = r.pantry.products().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Yogurt", "Rice"]);
        assert_eq!(r.removed.len(), 1);
        assert_eq!(r.removed[0].name(), "Bread");
        assert!(!r.is_noop());
    }

    #[test]
    fn reconcile_bread_and_rice() {
        let (p, _) = with(&Pantry::new(), "Bread", 1, -1);
        let (p, rice) = with(&p, "Rice", 1, 10);

        let r = p.reconcile(today());

        assert_eq!(r.pantry.len(), 1);
        assert_eq!(r.pantry.products()[0].id(), &rice);
    }

    #[test]
    fn reconcile_is_noop_when_nothing_expired() {
        let (p, _) = with(&Pantry::new(), "Rice", 1, 10);
        let r = p.reconcile(today());
        assert!(r.is_noop());
        assert_eq!(r.pantry, p);
    }

    #[test]
    fn increment_and_decrement() {
        let (p, id) = with(&Pantry::new(), "Eggs", 2, 5);

        let p = p.increment(&id).unwrap();
        assert_eq!(p.get(&id).unwrap().quantity(), 3);

        let p = p.decrement(&id).unwrap();
        assert_eq!(p.get(&id).unwrap().quantity(), 2);
    }

    #[test]
    fn decrement_to_zero_removes() {
        let (p, id) = with(&Pantry::new(), "Eggs", 1, 5);
        let (p, other) = with(&p, "Rice", 4, 5);

        let p = p.decrement(&id).unwrap();

        assert!(!p.contains(&id));
        assert_eq!(p.len(), 1);
        assert_eq!(p.get(&other).unwrap().quantity(), 4);
    }

    #[test]
    fn consume_removes_regardless_of_quantity() {
        let (p, id) = with(&Pantry::new(), "Flour", 7, 30);
        let p = p.consume(&id).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn missing_id_is_not_found() {
        let (p, _) = with(&Pantry::new(), "Flour", 7, 30);
        let ghost = ProductId::new();

        assert_eq!(p.increment(&ghost).unwrap_err(), DomainError::NotFound);
        assert_eq!(p.decrement(&ghost).unwrap_err(), DomainError::NotFound);
        assert_eq!(p.consume(&ghost).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn mutations_preserve_order() {
        let (p, a) = with(&Pantry::new(), "A", 1, 5);
        let (p, b) = with(&p, "B", 2, 5);
        let (p, c) = with(&p, "C", 1, 5);

        let p = p.increment(&b).unwrap();
        let ids: Vec<_> = p.products().iter().map(|p| p.id_typed()).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn execute_dispatches_commands() {
        let draft = ProductDraft::new("Cheese", 1u32, in_days(4));
        let p = Pantry::new()
            .execute(&PantryCommand::Add { draft })
            .unwrap();
        let id = p.products()[0].id_typed();

        let p = p.execute(&PantryCommand::Increment { id }).unwrap();
        assert_eq!(p.get(&id).unwrap().quantity(), 2);

        let p = p.execute(&PantryCommand::Consume { id }).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn board_and_expiring_names() {
        let (p, _) = with(&Pantry::new(), "Milk", 1, 1);
        let (p, _) = with(&p, "Cream", 1, 2);
        let (p, _) = with(&p, "Rice", 1, 10);

        let board = p.board(today());
        let urgencies: Vec<_> = board.iter().map(|e| e.urgency).collect();
        assert_eq!(urgencies, vec![Urgency::Urgent, Urgency::Soon, Urgency::Ok]);
        assert_eq!(board[1].days_left, 2);

        assert_eq!(p.expiring_names(today()), vec!["Milk", "Cream"]);
    }

    #[test]
    fn board_entry_serializes_flat() {
        let (p, _) = with(&Pantry::new(), "Milk", 1, 2);
        let value = serde_json::to_value(&p.board(today())[0]).unwrap();
        assert_eq!(value["name"], "Milk");
        assert_eq!(value["urgency"], "SOON");
        assert_eq!(value["daysLeft"], 2);
    }

    #[test]
    fn from_products_rejects_duplicate_ids() {
        let (p, _) = with(&Pantry::new(), "Milk", 1, 2);
        let mut records = p.into_products();
        records.push(records[0].clone());
        let err = Pantry::from_products(records).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn from_products_rejects_blank_name_and_negative_price() {
        let id = ProductId::new();
        let blank: Vec<Product> = serde_json::from_str(&format!(
            r#"[{{"id":"{id}","name":"  ","quantity":1,"expiryDate":"2099-01-01"}}]"#
        ))
        .unwrap();
        let err = Pantry::from_products(blank).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let negative: Vec<Product> = serde_json::from_str(&format!(
            r#"[{{"id":"{id}","name":"Milk","quantity":1,"price":-3,"expiryDate":"2099-01-01"}}]"#
        ))
        .unwrap();
        let err = Pantry::from_products(negative).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn command_wire_format() {
        let id = ProductId::new();
        let cmd: PantryCommand =
            serde_json::from_str(&format!(r#"{{"op":"decrement","id":"{id}"}}"#)).unwrap();
        assert_eq!(cmd, PantryCommand::Decrement { id });
        assert_eq!(cmd.name(), "decrement");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn pantry_from(cases: &[(u32, i64)]) -> Pantry {
            cases.iter().enumerate().fold(Pantry::new(), |p, (i, (qty, offset))| {
                p.add(&ProductDraft::new(format!("item-{i}"), *qty, in_days(*offset)))
                    .unwrap()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: reconciling twice equals reconciling once.
            #[test]
            fn reconcile_is_idempotent(cases in prop::collection::vec((1u32..5, -10i64..10), 0..20)) {
                let pantry = pantry_from(&cases);
                let once = pantry.reconcile(today());
                let twice = once.pantry.reconcile(today());
                prop_assert_eq!(&once.pantry, &twice.pantry);
                prop_assert!(twice.is_noop());
            }

            /// Property: no expired product survives reconciliation, nothing else is lost.
            #[test]
            fn reconcile_keeps_exactly_the_unexpired(cases in prop::collection::vec((1u32..5, -10i64..10), 0..20)) {
                let pantry = pantry_from(&cases);
                let r = pantry.reconcile(today());
                prop_assert!(r.pantry.products().iter().all(|p| !p.is_expired(today())));
                prop_assert!(r.removed.iter().all(|p| p.is_expired(today())));
                prop_assert_eq!(r.pantry.len() + r.removed.len(), pantry.len());
            }

            /// Property: decrement never leaves a non-positive quantity behind.
            #[test]
            fn decrement_never_leaves_zero(
                cases in prop::collection::vec((1u32..4, 0i64..10), 1..10),
                picks in prop::collection::vec(any::<prop::sample::Index>(), 1..30),
            ) {
                let mut pantry = pantry_from(&cases);
                for pick in picks {
                    if pantry.is_empty() {
                        break;
                    }
                    let id = pantry.products()[pick.index(pantry.len())].id_typed();
                    pantry = pantry.decrement(&id).unwrap();
                    prop_assert!(pantry.products().iter().all(|p| p.quantity() > 0));
                }
            }

            /// Property: ids stay unique under any sequence of mutations.
            #[test]
            fn ids_stay_unique(ops in prop::collection::vec((0u8..4, any::<prop::sample::Index>()), 1..40)) {
                let mut pantry = Pantry::new();
                for (op, pick) in ops {
                    pantry = match (op, pantry.is_empty()) {
                        (0, _) | (_, true) => pantry
                            .add(&ProductDraft::new("Item", 1u32, in_days(3)))
                            .unwrap(),
                        (1, false) => {
                            let id = pantry.products()[pick.index(pantry.len())].id_typed();
                            pantry.increment(&id).unwrap()
                        }
                        (2, false) => {
                            let id = pantry.products()[pick.index(pantry.len())].id_typed();
                            pantry.decrement(&id).unwrap()
                        }
                        _ => {
                            let id = pantry.products()[pick.index(pantry.len())].id_typed();
                            pantry.consume(&id).unwrap()
                        }
                    };
                    let ids: HashSet<_> = pantry.products().iter().map(|p| p.id_typed()).collect();
                    prop_assert_eq!(ids.len(), pantry.len());
                }
            }
        }
    }
}
