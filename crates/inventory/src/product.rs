use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use expiry_core::{DomainError, DomainResult, Entity, ProductId};

use crate::urgency::{Urgency, classify, days_until};

/// Date format used for expiry dates on the wire and in storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unit of measure for a tracked product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Pcs,
    Kg,
    G,
    Litre,
    Ml,
    Packet,
}

impl Unit {
    pub const ALL: [Unit; 6] = [Unit::Pcs, Unit::Kg, Unit::G, Unit::Litre, Unit::Ml, Unit::Packet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pcs => "pcs",
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Litre => "litre",
            Unit::Ml => "ml",
            Unit::Packet => "packet",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Unit::ALL
            .into_iter()
            .find(|u| u.as_str() == wanted)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown unit '{s}' (expected one of: pcs, kg, g, litre, ml, packet)"
                ))
            })
    }
}

/// A numeric form field: either a JSON number or the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(f64),
    Text(String),
}

impl FormNumber {
    /// `Ok(None)` for a blank field, `Err` for text that isn't a finite number.
    fn parse(&self, field: &str) -> DomainResult<Option<f64>> {
        let value = match self {
            FormNumber::Number(n) => *n,
            FormNumber::Text(s) if s.trim().is_empty() => return Ok(None),
            FormNumber::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::validation(format!("{field} must be a number")))?,
        };
        if !value.is_finite() {
            return Err(DomainError::validation(format!("{field} must be a number")));
        }
        Ok(Some(value))
    }
}

impl From<f64> for FormNumber {
    fn from(value: f64) -> Self {
        FormNumber::Number(value)
    }
}

impl From<u32> for FormNumber {
    fn from(value: u32) -> Self {
        FormNumber::Number(f64::from(value))
    }
}

impl From<&str> for FormNumber {
    fn from(value: &str) -> Self {
        FormNumber::Text(value.to_string())
    }
}

/// Unsaved input a user is composing before it is added to the pantry.
///
/// Every field is optional at this stage; [`Product::from_draft`] decides what
/// is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: Option<FormNumber>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub price: Option<FormNumber>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, quantity: impl Into<FormNumber>, expiry: NaiveDate) -> Self {
        Self {
            name: name.into(),
            quantity: Some(quantity.into()),
            expiry_date: Some(expiry.format(DATE_FORMAT).to_string()),
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit.as_str().to_string());
        self
    }

    pub fn with_price(mut self, price: impl Into<FormNumber>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A tracked perishable product.
///
/// Quantity is always at least 1 for a product held in a pantry; reaching zero
/// removes the product instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: u32,
    #[serde(default)]
    unit: Unit,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    category: String,
    expiry_date: NaiveDate,
}

impl Product {
    /// Validate a draft and turn it into a product with the given id.
    pub fn from_draft(id: ProductId, draft: &ProductDraft) -> DomainResult<Self> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }

        let quantity = match &draft.quantity {
            Some(q) => q.parse("quantity")?,
            None => None,
        }
        .ok_or_else(|| DomainError::validation("quantity is required"))?;
        if quantity <= 0.0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity.fract() != 0.0 {
            return Err(DomainError::validation("quantity must be a whole number"));
        }
        if quantity > f64::from(u32::MAX) {
            return Err(DomainError::validation("quantity is too large"));
        }

        let expiry_raw = draft
            .expiry_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::validation("expiry date is required"))?;
        let expiry_date = NaiveDate::parse_from_str(expiry_raw, DATE_FORMAT)
            .map_err(|_| DomainError::validation("expiry date must be formatted YYYY-MM-DD"))?;

        let unit = match draft.unit.as_deref().map(str::trim) {
            None | Some("") => Unit::default(),
            Some(raw) => raw.parse()?,
        };

        let price = match &draft.price {
            Some(p) => p.parse("price")?.unwrap_or(0.0),
            None => 0.0,
        };
        if price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            quantity: quantity as u32,
            unit,
            price,
            category: draft.category.as_deref().unwrap_or_default().trim().to_string(),
            expiry_date,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Strictly before `today`; an item expiring today is still usable.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        classify(self.expiry_date, today)
    }

    pub fn days_left(&self, today: NaiveDate) -> i64 {
        days_until(self.expiry_date, today)
    }

    pub(crate) fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
