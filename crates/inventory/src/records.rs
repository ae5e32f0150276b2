//! JSON records exchanged with the inventory service.
//!
//! The service embeds referenced records instead of sending bare foreign keys:
//! a stock lot carries its whole item, which carries its category and store.
//! These types match that shape (camelCase keys) and convert into the flat
//! domain model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use stocktrack_core::{CategoryId, ItemId, PurchaseId, StockId, StoreId};

use crate::model::{Category, Item, PurchaseRecord, StockLot, Store};

/// `{"id": n}` ⇄ `n` for required references.
pub(crate) mod nested_id {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct IdRef<T> {
        id: T,
    }

    pub fn serialize<T, S>(id: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        IdRef { id }.serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(IdRef::<T>::deserialize(deserializer)?.id)
    }
}

/// `{"id": n}` / `null` ⇄ `Option<n>` for optional references.
pub(crate) mod nested_id_opt {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct IdRef<T> {
        id: T,
    }

    pub fn serialize<T, S>(id: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        id.as_ref().map(|id| IdRef { id }).serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(Option::<IdRef<T>>::deserialize(deserializer)?.map(|r| r.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: NaiveDateTime,
}

impl From<&Category> for CategoryRecord {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(r: CategoryRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: NaiveDateTime,
}

impl From<&Store> for StoreRecord {
    fn from(s: &Store) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            location: s.location.clone(),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<StoreRecord> for Store {
    fn from(r: StoreRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            location: r.location,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRecord>,
    #[serde(default)]
    pub store: Option<StoreRecord>,
    #[serde(default)]
    pub price: i64,
    pub threshold: i64,
    pub has_expiry: bool,
    #[serde(default)]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: NaiveDateTime,
}

impl ItemRecord {
    /// Embed the item's category and store (when the caller could resolve them).
    pub fn new(item: &Item, category: Option<&Category>, store: Option<&Store>) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            note: item.note.clone(),
            category: category.map(CategoryRecord::from),
            store: store.map(StoreRecord::from),
            price: item.price,
            threshold: item.threshold,
            has_expiry: item.has_expiry,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<&ItemRecord> for Item {
    fn from(r: &ItemRecord) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            note: r.note.clone(),
            category_id: r.category.as_ref().map(|c| c.id),
            store_id: r.store.as_ref().map(|s| s.id),
            price: r.price,
            threshold: r.threshold,
            has_expiry: r.has_expiry,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(r: ItemRecord) -> Self {
        Item::from(&r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: StockId,
    pub item: ItemRecord,
    pub quantity: i64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: NaiveDateTime,
}

impl StockRecord {
    pub fn new(lot: &StockLot, item: ItemRecord) -> Self {
        Self {
            id: lot.id,
            item,
            quantity: lot.quantity,
            expiry_date: lot.expiry_date,
            created_at: lot.created_at,
            updated_at: lot.updated_at,
        }
    }
}

impl From<&StockRecord> for StockLot {
    fn from(r: &StockRecord) -> Self {
        Self {
            id: r.id,
            item_id: r.item.id,
            quantity: r.quantity,
            expiry_date: r.expiry_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<StockRecord> for StockLot {
    fn from(r: StockRecord) -> Self {
        StockLot::from(&r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHistoryRecord {
    pub id: PurchaseId,
    pub item: ItemRecord,
    #[serde(default)]
    pub store: Option<StoreRecord>,
    pub quantity: i64,
    #[serde(default)]
    pub total_price: Option<i64>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub purchased_at: NaiveDateTime,
    #[serde(default)]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: NaiveDateTime,
}

impl PurchaseHistoryRecord {
    pub fn new(purchase: &PurchaseRecord, item: ItemRecord, store: Option<&Store>) -> Self {
        Self {
            id: purchase.id,
            item,
            store: store.map(StoreRecord::from),
            quantity: purchase.quantity,
            total_price: purchase.total_price,
            expiry_date: purchase.expiry_date,
            purchased_at: purchase.purchased_at,
            created_at: purchase.created_at,
            updated_at: purchase.updated_at,
        }
    }
}

impl From<PurchaseHistoryRecord> for PurchaseRecord {
    fn from(r: PurchaseHistoryRecord) -> Self {
        Self {
            id: r.id,
            item_id: r.item.id,
            store_id: r.store.map(|s| s.id),
            quantity: r.quantity,
            total_price: r.total_price,
            expiry_date: r.expiry_date,
            purchased_at: r.purchased_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stock_record_flattens_to_lot() {
        let record: StockRecord = serde_json::from_value(json!({
            "id": 11,
            "item": {
                "id": 2,
                "name": "Frozen gyoza",
                "category": { "id": 5, "name": "Frozen food", "createdAt": "2024-01-01T09:00:00" },
                "threshold": 3,
                "hasExpiry": true
            },
            "quantity": 4,
            "expiryDate": "2024-01-12",
            "createdAt": "2024-01-05T10:30:00",
            "updatedAt": "2024-01-05T10:30:00"
        }))
        .unwrap();

        let lot = StockLot::from(&record);
        assert_eq!(lot.id, StockId::new(11));
        assert_eq!(lot.item_id, ItemId::new(2));
        assert_eq!(lot.expiry_date, NaiveDate::from_ymd_opt(2024, 1, 12));

        let item = Item::from(&record.item);
        assert_eq!(item.category_id, Some(CategoryId::new(5)));
        assert_eq!(item.store_id, None);
    }

    #[test]
    fn item_record_embeds_category_and_store() {
        let category = Category::new(CategoryId::new(1), "Seasoning");
        let store = Store::new(StoreId::new(3), "Corner market").with_location("Station Rd");
        let item = Item::new(ItemId::new(7), "Soy sauce", 3)
            .with_category(category.id)
            .with_store(store.id);

        let json = serde_json::to_value(ItemRecord::new(&item, Some(&category), Some(&store))).unwrap();

        assert_eq!(json["category"]["name"], "Seasoning");
        assert_eq!(json["store"]["location"], "Station Rd");
        assert_eq!(json["hasExpiry"], false);
        assert!(json.get("category_id").is_none());
    }

    #[test]
    fn missing_expiry_date_reads_as_none() {
        let record: StockRecord = serde_json::from_value(json!({
            "id": 1,
            "item": { "id": 1, "name": "Toothpaste", "threshold": 1, "hasExpiry": false },
            "quantity": 2,
            "expiryDate": null
        }))
        .unwrap();
        assert_eq!(record.expiry_date, None);
    }
}
