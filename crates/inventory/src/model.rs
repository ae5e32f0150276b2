//! Inventory records as the rest of the system sees them.
//!
//! References between records are held as optional identifiers; resolving them
//! (e.g. an item's category name) is the caller's job.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use stocktrack_core::{CategoryId, Entity, ItemId, PurchaseId, StockId, StoreId};

/// Grouping used to filter items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

/// A shop an item is usually bought from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub location: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Store {
    pub fn new(id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> StoreId {
        self.id
    }
}

/// A tracked product.
///
/// `threshold` is the reorder point. `has_expiry` is informational: status
/// classification looks at the lots' expiry dates, not at this flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub note: Option<String>,
    pub category_id: Option<CategoryId>,
    pub store_id: Option<StoreId>,
    pub price: i64,
    pub threshold: i64,
    pub has_expiry: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, threshold: i64) -> Self {
        Self {
            id,
            name: name.into(),
            note: None,
            category_id: None,
            store_id: None,
            price: 0,
            threshold,
            has_expiry: false,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_store(mut self, store_id: StoreId) -> Self {
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
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

/// One quantity batch of an item, optionally with its own expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLot {
    pub id: StockId,
    pub item_id: ItemId,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl StockLot {
    pub fn new(id: StockId, item_id: ItemId, quantity: i64) -> Self {
        Self {
            id,
            item_id,
            quantity,
            expiry_date: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    pub fn expiring_on(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    /// True when this lot belongs to the given item.
    pub fn belongs_to(&self, item_id: ItemId) -> bool {
        self.item_id == item_id
    }
}

impl Entity for StockLot {
    type Id = StockId;

    fn id(&self) -> StockId {
        self.id
    }
}

/// A past purchase of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: PurchaseId,
    pub item_id: ItemId,
    pub store_id: Option<StoreId>,
    pub quantity: i64,
    pub total_price: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
    pub purchased_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entity for PurchaseRecord {
    type Id = PurchaseId;

    fn id(&self) -> PurchaseId {
        self.id
    }
}
