//! Create/update payloads.
//!
//! A draft is what a caller sends to create or replace a record: everything but
//! the identifier and timestamps. Drafts serialize to the service's JSON shape
//! (camelCase keys, references as nested `{"id": n}` objects).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use stocktrack_core::{CategoryId, DomainError, DomainResult, ItemId, StoreId};

use crate::records::{nested_id, nested_id_opt};

const MAX_NAME_LEN: usize = 150;
const MAX_NOTE_LEN: usize = 500;

fn ensure_name(what: &str, name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation(format!("{what} name cannot be empty")));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "{what} name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn ensure_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_name("category", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStore {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl NewStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_name("store", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(rename = "category", default, with = "nested_id_opt")]
    pub category_id: Option<CategoryId>,
    #[serde(rename = "store", default, with = "nested_id_opt")]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub threshold: i64,
    #[serde(default)]
    pub has_expiry: bool,
}

impl NewItem {
    pub fn new(name: impl Into<String>, threshold: i64) -> Self {
        Self {
            name: name.into(),
            note: None,
            category_id: None,
            store_id: None,
            price: 0,
            threshold,
            has_expiry: false,
        }
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn at_store(mut self, store_id: StoreId) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn with_expiry(mut self, has_expiry: bool) -> Self {
        self.has_expiry = has_expiry;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_name("item", &self.name)?;
        if let Some(note) = &self.note {
            if note.chars().count() > MAX_NOTE_LEN {
                return Err(DomainError::validation(format!(
                    "note cannot exceed {MAX_NOTE_LEN} characters"
                )));
            }
        }
        ensure_non_negative("threshold", self.threshold)?;
        ensure_non_negative("price", self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockLot {
    #[serde(rename = "item", with = "nested_id")]
    pub item_id: ItemId,
    pub quantity: i64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl NewStockLot {
    pub fn new(item_id: ItemId, quantity: i64) -> Self {
        Self {
            item_id,
            quantity,
            expiry_date: None,
        }
    }

    pub fn expiring_on(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_non_negative("quantity", self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    #[serde(rename = "item", with = "nested_id")]
    pub item_id: ItemId,
    #[serde(rename = "store", default, with = "nested_id_opt")]
    pub store_id: Option<StoreId>,
    pub quantity: i64,
    #[serde(default)]
    pub total_price: Option<i64>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Defaults to the time the record is stored.
    #[serde(default)]
    pub purchased_at: Option<NaiveDateTime>,
}

impl NewPurchase {
    pub fn new(item_id: ItemId, quantity: i64) -> Self {
        Self {
            item_id,
            store_id: None,
            quantity,
            total_price: None,
            expiry_date: None,
            purchased_at: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_non_negative("quantity", self.quantity)?;
        if let Some(total) = self.total_price {
            ensure_non_negative("totalPrice", total)?;
        }
        Ok(())
    }
}
