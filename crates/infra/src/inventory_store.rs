use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, NaiveDateTime};

use stocktrack_core::{
    CategoryId, DomainError, DomainResult, Entity, ItemId, PurchaseId, StockId, StoreId,
};
use stocktrack_inventory::{
    Category, Item, ItemStockSummary, NewCategory, NewItem, NewPurchase, NewStockLot, NewStore,
    PurchaseRecord, StockLot, StockStatus, Store, alerts, status,
};

use crate::repository::InMemoryRepository;

/// Identity column: hands out 1, 2, 3, ... and never reuses a value.
#[derive(Debug)]
struct Sequence(AtomicI64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// All inventory records for one process.
///
/// Mutations take the timestamp to stamp records with (`at`), and status
/// queries take the reference date (`today`); the store never reads the clock.
///
/// Deleting a record cleans up what points at it:
/// - item: its stock lots and purchase records are deleted;
/// - store: items and purchases forget the store;
/// - category: items forget the category.
#[derive(Debug)]
pub struct InventoryStore {
    categories: InMemoryRepository<CategoryId, Category>,
    stores: InMemoryRepository<StoreId, Store>,
    items: InMemoryRepository<ItemId, Item>,
    stocks: InMemoryRepository<StockId, StockLot>,
    purchases: InMemoryRepository<PurchaseId, PurchaseRecord>,
    category_seq: Sequence,
    store_seq: Sequence,
    item_seq: Sequence,
    stock_seq: Sequence,
    purchase_seq: Sequence,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self {
            categories: InMemoryRepository::new(),
            stores: InMemoryRepository::new(),
            items: InMemoryRepository::new(),
            stocks: InMemoryRepository::new(),
            purchases: InMemoryRepository::new(),
            category_seq: Sequence::new(),
            store_seq: Sequence::new(),
            item_seq: Sequence::new(),
            stock_seq: Sequence::new(),
            purchase_seq: Sequence::new(),
        }
    }

    // -------------------------
    // Categories
    // -------------------------

    pub fn list_categories(&self) -> Vec<Category> {
        self.categories.list()
    }

    pub fn category(&self, id: CategoryId) -> DomainResult<Category> {
        self.categories
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("category {id}")))
    }

    /// Store `category` unless another category already has its name.
    fn put_category(&self, category: &Category) -> DomainResult<()> {
        let name = category.name.as_str();
        if self
            .categories
            .upsert_unless(category.id, category.clone(), |c| c.name == name)
        {
            Ok(())
        } else {
            Err(DomainError::conflict(format!("category \"{name}\" already exists")))
        }
    }

    pub fn create_category(&self, draft: NewCategory, at: NaiveDateTime) -> DomainResult<Category> {
        draft.validate()?;

        let category = Category {
            id: CategoryId::new(self.category_seq.next()),
            name: draft.name,
            created_at: at,
            updated_at: at,
        };
        self.put_category(&category)?;
        tracing::debug!(category_id = %category.id, "category created");
        Ok(category)
    }

    pub fn update_category(
        &self,
        id: CategoryId,
        draft: NewCategory,
        at: NaiveDateTime,
    ) -> DomainResult<Category> {
        draft.validate()?;
        let mut category = self.category(id)?;

        category.name = draft.name;
        category.updated_at = at;
        self.put_category(&category)?;
        tracing::debug!(category_id = %id, "category updated");
        Ok(category)
    }

    pub fn delete_category(&self, id: CategoryId) -> DomainResult<()> {
        self.categories
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("category {id}")))?;
        let detached = self
            .items
            .update_where(|i| i.category_id == Some(id), |i| i.category_id = None);
        tracing::debug!(category_id = %id, detached_items = detached, "category deleted");
        Ok(())
    }

    pub fn search_categories(&self, keyword: &str) -> Vec<Category> {
        self.categories.filter(|c| contains_ignore_case(&c.name, keyword))
    }

    pub fn category_by_name(&self, name: &str) -> DomainResult<Category> {
        self.categories
            .find(|c| c.name == name)
            .ok_or_else(|| DomainError::not_found(format!("category \"{name}\"")))
    }

    pub fn category_exists(&self, name: &str) -> bool {
        self.categories.find(|c| c.name == name).is_some()
    }

    // -------------------------
    // Stores
    // -------------------------

    pub fn list_stores(&self) -> Vec<Store> {
        self.stores.list()
    }

    pub fn store(&self, id: StoreId) -> DomainResult<Store> {
        self.stores
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("store {id}")))
    }

    /// Store `store` unless another store already has its name.
    fn put_store(&self, store: &Store) -> DomainResult<()> {
        let name = store.name.as_str();
        if self
            .stores
            .upsert_unless(store.id, store.clone(), |s| s.name == name)
        {
            Ok(())
        } else {
            Err(DomainError::conflict(format!("store \"{name}\" already exists")))
        }
    }

    pub fn create_store(&self, draft: NewStore, at: NaiveDateTime) -> DomainResult<Store> {
        draft.validate()?;

        let store = Store {
            id: StoreId::new(self.store_seq.next()),
            name: draft.name,
            location: draft.location,
            created_at: at,
            updated_at: at,
        };
        self.put_store(&store)?;
        tracing::debug!(store_id = %store.id, "store created");
        Ok(store)
    }

    pub fn update_store(&self, id: StoreId, draft: NewStore, at: NaiveDateTime) -> DomainResult<Store> {
        draft.validate()?;
        let mut store = self.store(id)?;

        store.name = draft.name;
        store.location = draft.location;
        store.updated_at = at;
        self.put_store(&store)?;
        tracing::debug!(store_id = %id, "store updated");
        Ok(store)
    }

    pub fn delete_store(&self, id: StoreId) -> DomainResult<()> {
        self.stores
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("store {id}")))?;
        let detached = self
            .items
            .update_where(|i| i.store_id == Some(id), |i| i.store_id = None);
        self.purchases
            .update_where(|p| p.store_id == Some(id), |p| p.store_id = None);
        tracing::debug!(store_id = %id, detached_items = detached, "store deleted");
        Ok(())
    }

    pub fn search_stores(&self, keyword: &str) -> Vec<Store> {
        self.stores.filter(|s| contains_ignore_case(&s.name, keyword))
    }

    pub fn store_by_name(&self, name: &str) -> DomainResult<Store> {
        self.stores
            .find(|s| s.name == name)
            .ok_or_else(|| DomainError::not_found(format!("store \"{name}\"")))
    }

    pub fn store_exists(&self, name: &str) -> bool {
        self.stores.find(|s| s.name == name).is_some()
    }

    pub fn stores_by_location(&self, location: &str) -> Vec<Store> {
        self.stores.filter(|s| {
            s.location
                .as_deref()
                .is_some_and(|l| contains_ignore_case(l, location))
        })
    }

    // -------------------------
    // Items
    // -------------------------

    pub fn list_items(&self) -> Vec<Item> {
        self.items.list()
    }

    pub fn item(&self, id: ItemId) -> DomainResult<Item> {
        self.items
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))
    }

    fn check_item_refs(&self, draft: &NewItem) -> DomainResult<()> {
        if let Some(id) = draft.category_id {
            if !self.categories.contains(&id) {
                return Err(DomainError::validation(format!("unknown category {id}")));
            }
        }
        if let Some(id) = draft.store_id {
            if !self.stores.contains(&id) {
                return Err(DomainError::validation(format!("unknown store {id}")));
            }
        }
        Ok(())
    }

    pub fn create_item(&self, draft: NewItem, at: NaiveDateTime) -> DomainResult<Item> {
        draft.validate()?;
        self.check_item_refs(&draft)?;

        let item = Item {
            id: ItemId::new(self.item_seq.next()),
            name: draft.name,
            note: draft.note,
            category_id: draft.category_id,
            store_id: draft.store_id,
            price: draft.price,
            threshold: draft.threshold,
            has_expiry: draft.has_expiry,
            created_at: at,
            updated_at: at,
        };
        self.items.upsert(item.id, item.clone());
        tracing::debug!(item_id = %item.id, "item created");
        Ok(item)
    }

    pub fn update_item(&self, id: ItemId, draft: NewItem, at: NaiveDateTime) -> DomainResult<Item> {
        draft.validate()?;
        self.check_item_refs(&draft)?;
        let mut item = self.item(id)?;

        item.name = draft.name;
        item.note = draft.note;
        item.category_id = draft.category_id;
        item.store_id = draft.store_id;
        item.price = draft.price;
        item.threshold = draft.threshold;
        item.has_expiry = draft.has_expiry;
        item.updated_at = at;
        self.items.upsert(id, item.clone());
        tracing::debug!(item_id = %id, "item updated");
        Ok(item)
    }

    pub fn delete_item(&self, id: ItemId) -> DomainResult<()> {
        self.items
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;
        let lots = self.stocks.remove_where(|s| s.belongs_to(id));
        let purchases = self.purchases.remove_where(|p| p.item_id == id);
        tracing::debug!(item_id = %id, lots, purchases, "item deleted");
        Ok(())
    }

    pub fn items_in_category(&self, category_id: CategoryId) -> Vec<Item> {
        self.items.filter(|i| i.category_id == Some(category_id))
    }

    pub fn items_at_store(&self, store_id: StoreId) -> Vec<Item> {
        self.items.filter(|i| i.store_id == Some(store_id))
    }

    pub fn items_without_store(&self) -> Vec<Item> {
        self.items.filter(|i| i.store_id.is_none())
    }

    pub fn search_items(&self, name: &str) -> Vec<Item> {
        self.items.filter(|i| contains_ignore_case(&i.name, name))
    }

    pub fn items_by_expiry_flag(&self, has_expiry: bool) -> Vec<Item> {
        self.items.filter(|i| i.has_expiry == has_expiry)
    }

    /// Items whose threshold is strictly below `threshold`.
    pub fn items_with_threshold_below(&self, threshold: i64) -> Vec<Item> {
        self.items.filter(|i| i.threshold < threshold)
    }

    /// Items whose total on hand is at or below their threshold.
    pub fn low_stock_items(&self) -> Vec<Item> {
        let lots = self.stocks.list();
        self.items
            .filter(|i| status::total_quantity(i, &lots) <= i.threshold)
    }

    pub fn item_summary(&self, id: ItemId, today: NaiveDate) -> DomainResult<ItemStockSummary> {
        let item = self.item(id)?;
        Ok(status::summarize(&item, &self.stocks.list(), today))
    }

    // -------------------------
    // Stock lots
    // -------------------------

    pub fn list_stocks(&self) -> Vec<StockLot> {
        self.stocks.list()
    }

    pub fn stock(&self, id: StockId) -> DomainResult<StockLot> {
        self.stocks
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("stock {id}")))
    }

    fn check_lot_item(&self, item_id: ItemId) -> DomainResult<()> {
        if self.items.contains(&item_id) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown item {item_id}")))
        }
    }

    pub fn create_stock(&self, draft: NewStockLot, at: NaiveDateTime) -> DomainResult<StockLot> {
        draft.validate()?;
        self.check_lot_item(draft.item_id)?;

        let lot = StockLot {
            id: StockId::new(self.stock_seq.next()),
            item_id: draft.item_id,
            quantity: draft.quantity,
            expiry_date: draft.expiry_date,
            created_at: at,
            updated_at: at,
        };
        self.stocks.upsert(lot.id, lot.clone());
        tracing::debug!(stock_id = %lot.id, item_id = %lot.item_id, "stock lot created");
        Ok(lot)
    }

    pub fn update_stock(&self, id: StockId, draft: NewStockLot, at: NaiveDateTime) -> DomainResult<StockLot> {
        draft.validate()?;
        self.check_lot_item(draft.item_id)?;
        let mut lot = self.stock(id)?;

        lot.item_id = draft.item_id;
        lot.quantity = draft.quantity;
        lot.expiry_date = draft.expiry_date;
        lot.updated_at = at;
        self.stocks.upsert(id, lot.clone());
        tracing::debug!(stock_id = %id, "stock lot updated");
        Ok(lot)
    }

    pub fn delete_stock(&self, id: StockId) -> DomainResult<()> {
        self.stocks
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("stock {id}")))?;
        tracing::debug!(stock_id = %id, "stock lot deleted");
        Ok(())
    }

    pub fn stocks_for_item(&self, item_id: ItemId) -> Vec<StockLot> {
        self.stocks.filter(|s| s.belongs_to(item_id))
    }

    pub fn stocks_by_expiry(&self, item_id: ItemId) -> Vec<StockLot> {
        let lots = self.stocks.list();
        alerts::lots_by_expiry(item_id, &lots)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn total_quantity(&self, item_id: ItemId) -> DomainResult<i64> {
        let item = self.item(item_id)?;
        Ok(status::total_quantity(&item, &self.stocks.list()))
    }

    pub fn low_stock_lots(&self) -> Vec<StockLot> {
        let items = self.items.list();
        let lots = self.stocks.list();
        alerts::low_stock_lots(&items, &lots)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn low_stock_lots_for_item(&self, item_id: ItemId) -> Vec<StockLot> {
        let mut lots = self.low_stock_lots();
        lots.retain(|s| s.belongs_to(item_id));
        lots
    }

    pub fn expiring_lots(&self, today: NaiveDate, days_ahead: u32) -> Vec<StockLot> {
        let lots = self.stocks.list();
        alerts::expiring_lots(&lots, today, days_ahead)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn expired_lots(&self, today: NaiveDate) -> Vec<StockLot> {
        let lots = self.stocks.list();
        alerts::expired_lots(&lots, today)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn stock_status(&self, id: StockId, today: NaiveDate) -> DomainResult<StockStatus> {
        let lot = self.stock(id)?;
        let item = self.item(lot.item_id)?;
        Ok(alerts::lot_status(&lot, &item, &self.stocks.list(), today))
    }

    // -------------------------
    // Purchase records
    // -------------------------

    pub fn list_purchases(&self) -> Vec<PurchaseRecord> {
        self.purchases.list()
    }

    pub fn purchase(&self, id: PurchaseId) -> DomainResult<PurchaseRecord> {
        self.purchases
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("purchase {id}")))
    }

    fn check_purchase_refs(&self, draft: &NewPurchase) -> DomainResult<()> {
        self.check_lot_item(draft.item_id)?;
        if let Some(id) = draft.store_id {
            if !self.stores.contains(&id) {
                return Err(DomainError::validation(format!("unknown store {id}")));
            }
        }
        Ok(())
    }

    pub fn create_purchase(&self, draft: NewPurchase, at: NaiveDateTime) -> DomainResult<PurchaseRecord> {
        draft.validate()?;
        self.check_purchase_refs(&draft)?;

        let purchase = PurchaseRecord {
            id: PurchaseId::new(self.purchase_seq.next()),
            item_id: draft.item_id,
            store_id: draft.store_id,
            quantity: draft.quantity,
            total_price: draft.total_price,
            expiry_date: draft.expiry_date,
            purchased_at: draft.purchased_at.unwrap_or(at),
            created_at: at,
            updated_at: at,
        };
        self.purchases.upsert(purchase.id, purchase.clone());
        tracing::debug!(purchase_id = %purchase.id, item_id = %purchase.item_id, "purchase recorded");
        Ok(purchase)
    }

    pub fn update_purchase(
        &self,
        id: PurchaseId,
        draft: NewPurchase,
        at: NaiveDateTime,
    ) -> DomainResult<PurchaseRecord> {
        draft.validate()?;
        self.check_purchase_refs(&draft)?;
        let mut purchase = self.purchase(id)?;

        purchase.item_id = draft.item_id;
        purchase.store_id = draft.store_id;
        purchase.quantity = draft.quantity;
        purchase.total_price = draft.total_price;
        purchase.expiry_date = draft.expiry_date;
        if let Some(purchased_at) = draft.purchased_at {
            purchase.purchased_at = purchased_at;
        }
        purchase.updated_at = at;
        self.purchases.upsert(id, purchase.clone());
        tracing::debug!(purchase_id = %id, "purchase updated");
        Ok(purchase)
    }

    pub fn delete_purchase(&self, id: PurchaseId) -> DomainResult<()> {
        self.purchases
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("purchase {id}")))?;
        tracing::debug!(purchase_id = %id, "purchase deleted");
        Ok(())
    }

    /// The item's purchases, most recent first.
    pub fn purchases_for_item(&self, item_id: ItemId) -> Vec<PurchaseRecord> {
        let mut out = self.purchases.filter(|p| p.item_id == item_id);
        out.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at).then(b.id().cmp(&a.id())));
        out
    }

    /// Purchases made within `[start, end]`.
    pub fn purchases_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<PurchaseRecord> {
        self.purchases
            .filter(|p| p.purchased_at >= start && p.purchased_at <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn today() -> NaiveDate {
        at().date()
    }

    fn seeded() -> (InventoryStore, Category, Item) {
        let store = InventoryStore::new();
        let seasoning = store.create_category(NewCategory::new("Seasoning"), at()).unwrap();
        let soy = store
            .create_item(NewItem::new("Soy sauce", 3).in_category(seasoning.id), at())
            .unwrap();
        (store, seasoning, soy)
    }

    #[test]
    fn ids_are_assigned_in_sequence() {
        let store = InventoryStore::new();
        let a = store.create_category(NewCategory::new("A"), at()).unwrap();
        let b = store.create_category(NewCategory::new("B"), at()).unwrap();
        assert_eq!(a.id, CategoryId::new(1));
        assert_eq!(b.id, CategoryId::new(2));
    }

    #[test]
    fn duplicate_category_names_conflict() {
        let (store, seasoning, _) = seeded();
        let err = store
            .create_category(NewCategory::new("Seasoning"), at())
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Renaming a category to its own name is fine.
        assert!(store
            .update_category(seasoning.id, NewCategory::new("Seasoning"), at())
            .is_ok());
    }

    #[test]
    fn concurrent_creates_with_one_name_admit_a_single_winner() {
        let store = InventoryStore::new();
        let created = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| store.create_category(NewCategory::new("Seasoning"), at())))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(Result::is_ok)
                .count()
        });

        assert_eq!(created, 1);
        assert_eq!(store.list_categories().len(), 1);
    }

    #[test]
    fn renaming_a_store_onto_another_name_conflicts() {
        let store = InventoryStore::new();
        store.create_store(NewStore::new("Green Market"), at()).unwrap();
        let pharmacy = store.create_store(NewStore::new("Corner Pharmacy"), at()).unwrap();

        let err = store
            .update_store(pharmacy.id, NewStore::new("Green Market"), at())
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.store(pharmacy.id).unwrap().name, "Corner Pharmacy");
    }

    #[test]
    fn item_with_unknown_category_is_rejected() {
        let store = InventoryStore::new();
        let err = store
            .create_item(NewItem::new("Miso", 2).in_category(CategoryId::new(99)), at())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deleting_item_removes_its_lots_and_purchases() {
        let (store, _, soy) = seeded();
        store.create_stock(NewStockLot::new(soy.id, 2), at()).unwrap();
        store.create_stock(NewStockLot::new(soy.id, 1), at()).unwrap();
        store.create_purchase(NewPurchase::new(soy.id, 3), at()).unwrap();

        store.delete_item(soy.id).unwrap();

        assert!(store.list_stocks().is_empty());
        assert!(store.list_purchases().is_empty());
        assert!(matches!(store.item(soy.id), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn deleting_store_detaches_items() {
        let store = InventoryStore::new();
        let market = store
            .create_store(NewStore::new("Market").with_location("Station Rd"), at())
            .unwrap();
        let item = store
            .create_item(NewItem::new("Toothpaste", 1).at_store(market.id), at())
            .unwrap();

        assert_eq!(store.items_at_store(market.id).len(), 1);
        store.delete_store(market.id).unwrap();

        assert_eq!(store.item(item.id).unwrap().store_id, None);
        assert_eq!(store.items_without_store().len(), 1);
    }

    #[test]
    fn deleting_category_detaches_items() {
        let (store, seasoning, soy) = seeded();
        store.delete_category(seasoning.id).unwrap();
        assert_eq!(store.item(soy.id).unwrap().category_id, None);
        assert!(store.delete_category(seasoning.id).is_err());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (store, _, _) = seeded();
        store.create_item(NewItem::new("Frozen gyoza", 1), at()).unwrap();

        assert_eq!(store.search_items("SAUCE").len(), 1);
        assert_eq!(store.search_items("o").len(), 2);
        assert_eq!(store.search_categories("season").len(), 1);
        assert!(store.category_exists("Seasoning"));
        assert!(!store.category_exists("seasoning"));
    }

    #[test]
    fn summary_and_lot_status_follow_the_engine() {
        let (store, _, soy) = seeded();
        let lot = store
            .create_stock(
                NewStockLot::new(soy.id, 2).expiring_on(today() + chrono::Duration::days(2)),
                at(),
            )
            .unwrap();

        let summary = store.item_summary(soy.id, today()).unwrap();
        assert_eq!(summary.total_quantity, 2);
        assert_eq!(summary.status, StockStatus::Expiring);
        assert_eq!(store.stock_status(lot.id, today()).unwrap(), StockStatus::Expiring);
        assert_eq!(store.total_quantity(soy.id).unwrap(), 2);
    }

    #[test]
    fn low_stock_views() {
        let (store, _, soy) = seeded();
        let plenty = store.create_item(NewItem::new("Rice", 1), at()).unwrap();
        store.create_stock(NewStockLot::new(soy.id, 2), at()).unwrap();
        store.create_stock(NewStockLot::new(plenty.id, 10), at()).unwrap();

        let items: Vec<_> = store.low_stock_items().into_iter().map(|i| i.id).collect();
        assert_eq!(items, vec![soy.id]);
        assert_eq!(store.low_stock_lots().len(), 1);
        assert_eq!(store.low_stock_lots_for_item(soy.id).len(), 1);
        assert!(store.low_stock_lots_for_item(plenty.id).is_empty());
    }

    #[test]
    fn expiry_alerts() {
        let (store, _, soy) = seeded();
        let day = |n| today() + chrono::Duration::days(n);
        store
            .create_stock(NewStockLot::new(soy.id, 1).expiring_on(day(-1)), at())
            .unwrap();
        store
            .create_stock(NewStockLot::new(soy.id, 1).expiring_on(day(2)), at())
            .unwrap();
        store
            .create_stock(NewStockLot::new(soy.id, 1).expiring_on(day(20)), at())
            .unwrap();

        assert_eq!(store.expired_lots(today()).len(), 1);
        assert_eq!(store.expiring_lots(today(), 3).len(), 2);
        let ordered = store.stocks_by_expiry(soy.id);
        assert_eq!(ordered[0].expiry_date, Some(day(-1)));
    }

    #[test]
    fn purchases_by_item_are_newest_first() {
        let (store, _, soy) = seeded();
        let mut older = NewPurchase::new(soy.id, 1);
        older.purchased_at = Some(at() - chrono::Duration::days(3));
        store.create_purchase(older, at()).unwrap();
        store.create_purchase(NewPurchase::new(soy.id, 2), at()).unwrap();

        let history = store.purchases_for_item(soy.id);
        assert_eq!(history[0].quantity, 2);
        assert_eq!(history[1].quantity, 1);

        let window = store.purchases_between(at() - chrono::Duration::days(1), at());
        assert_eq!(window.len(), 1);
    }
}
