//! One handle per REST resource, borrowed from an [`ApiClient`].

use chrono::NaiveDateTime;

use stocktrack_core::{CategoryId, ItemId, PurchaseId, StockId, StoreId};
use stocktrack_inventory::{
    CategoryRecord, ItemRecord, ItemStockSummary, NewCategory, NewItem, NewPurchase, NewStockLot,
    NewStore, PurchaseHistoryRecord, StockRecord, StockStatus, StoreRecord,
};

use crate::error::ClientError;
use crate::http::ApiClient;

type Result<T> = std::result::Result<T, ClientError>;

/// `/categories`
#[derive(Debug, Clone, Copy)]
pub struct Categories<'a> {
    api: &'a ApiClient,
}

impl<'a> Categories<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<CategoryRecord>> {
        self.api.get(&["categories"], &[]).await
    }

    pub async fn get(&self, id: CategoryId) -> Result<CategoryRecord> {
        self.api.get(&["categories", &id.to_string()], &[]).await
    }

    pub async fn create(&self, draft: &NewCategory) -> Result<CategoryRecord> {
        self.api.post(&["categories"], draft).await
    }

    pub async fn update(&self, id: CategoryId, draft: &NewCategory) -> Result<CategoryRecord> {
        self.api.put(&["categories", &id.to_string()], draft).await
    }

    pub async fn delete(&self, id: CategoryId) -> Result<()> {
        self.api.delete(&["categories", &id.to_string()]).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<CategoryRecord>> {
        self.api
            .get(&["categories", "search"], &[("keyword", keyword.to_owned())])
            .await
    }

    pub async fn by_name(&self, name: &str) -> Result<CategoryRecord> {
        self.api.get(&["categories", "name", name], &[]).await
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        self.api.get(&["categories", "exists", name], &[]).await
    }
}

/// `/stores`
#[derive(Debug, Clone, Copy)]
pub struct Stores<'a> {
    api: &'a ApiClient,
}

impl<'a> Stores<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<StoreRecord>> {
        self.api.get(&["stores"], &[]).await
    }

    pub async fn get(&self, id: StoreId) -> Result<StoreRecord> {
        self.api.get(&["stores", &id.to_string()], &[]).await
    }

    pub async fn create(&self, draft: &NewStore) -> Result<StoreRecord> {
        self.api.post(&["stores"], draft).await
    }

    pub async fn update(&self, id: StoreId, draft: &NewStore) -> Result<StoreRecord> {
        self.api.put(&["stores", &id.to_string()], draft).await
    }

    pub async fn delete(&self, id: StoreId) -> Result<()> {
        self.api.delete(&["stores", &id.to_string()]).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<StoreRecord>> {
        self.api
            .get(&["stores", "search"], &[("keyword", keyword.to_owned())])
            .await
    }

    pub async fn by_location(&self, location: &str) -> Result<Vec<StoreRecord>> {
        self.api
            .get(&["stores", "location"], &[("location", location.to_owned())])
            .await
    }

    pub async fn by_name(&self, name: &str) -> Result<StoreRecord> {
        self.api.get(&["stores", "name", name], &[]).await
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        self.api.get(&["stores", "exists", name], &[]).await
    }
}

/// `/items`
#[derive(Debug, Clone, Copy)]
pub struct Items<'a> {
    api: &'a ApiClient,
}

impl<'a> Items<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<ItemRecord>> {
        self.api.get(&["items"], &[]).await
    }

    pub async fn get(&self, id: ItemId) -> Result<ItemRecord> {
        self.api.get(&["items", &id.to_string()], &[]).await
    }

    pub async fn create(&self, draft: &NewItem) -> Result<ItemRecord> {
        self.api.post(&["items"], draft).await
    }

    pub async fn update(&self, id: ItemId, draft: &NewItem) -> Result<ItemRecord> {
        self.api.put(&["items", &id.to_string()], draft).await
    }

    /// Also deletes the item's stock lots and purchase records.
    pub async fn delete(&self, id: ItemId) -> Result<()> {
        self.api.delete(&["items", &id.to_string()]).await
    }

    pub async fn in_category(&self, category_id: CategoryId) -> Result<Vec<ItemRecord>> {
        self.api
            .get(&["items", "category", &category_id.to_string()], &[])
            .await
    }

    pub async fn at_store(&self, store_id: StoreId) -> Result<Vec<ItemRecord>> {
        self.api
            .get(&["items", "store", &store_id.to_string()], &[])
            .await
    }

    pub async fn without_store(&self) -> Result<Vec<ItemRecord>> {
        self.api.get(&["items", "store", "null"], &[]).await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<ItemRecord>> {
        self.api
            .get(&["items", "search"], &[("name", name.to_owned())])
            .await
    }

    pub async fn by_expiry_flag(&self, has_expiry: bool) -> Result<Vec<ItemRecord>> {
        self.api
            .get(&["items", "expiry", &has_expiry.to_string()], &[])
            .await
    }

    pub async fn threshold_below(&self, threshold: i64) -> Result<Vec<ItemRecord>> {
        self.api
            .get(&["items", "threshold", &threshold.to_string()], &[])
            .await
    }

    pub async fn low_stock(&self) -> Result<Vec<ItemRecord>> {
        self.api.get(&["items", "alerts", "low-stock"], &[]).await
    }

    pub async fn summary(&self, id: ItemId) -> Result<ItemStockSummary> {
        self.api
            .get(&["items", &id.to_string(), "summary"], &[])
            .await
    }
}

/// `/stocks`
#[derive(Debug, Clone, Copy)]
pub struct Stocks<'a> {
    api: &'a ApiClient,
}

impl<'a> Stocks<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<StockRecord>> {
        self.api.get(&["stocks"], &[]).await
    }

    pub async fn get(&self, id: StockId) -> Result<StockRecord> {
        self.api.get(&["stocks", &id.to_string()], &[]).await
    }

    pub async fn create(&self, draft: &NewStockLot) -> Result<StockRecord> {
        self.api.post(&["stocks"], draft).await
    }

    pub async fn update(&self, id: StockId, draft: &NewStockLot) -> Result<StockRecord> {
        self.api.put(&["stocks", &id.to_string()], draft).await
    }

    pub async fn delete(&self, id: StockId) -> Result<()> {
        self.api.delete(&["stocks", &id.to_string()]).await
    }

    pub async fn for_item(&self, item_id: ItemId) -> Result<Vec<StockRecord>> {
        self.api
            .get(&["stocks", "item", &item_id.to_string()], &[])
            .await
    }

    pub async fn by_expiry(&self, item_id: ItemId) -> Result<Vec<StockRecord>> {
        self.api
            .get(&["stocks", "item", &item_id.to_string(), "expiry-ordered"], &[])
            .await
    }

    pub async fn total_quantity(&self, item_id: ItemId) -> Result<i64> {
        self.api
            .get(&["stocks", "item", &item_id.to_string(), "total-quantity"], &[])
            .await
    }

    pub async fn low_stock(&self) -> Result<Vec<StockRecord>> {
        self.api.get(&["stocks", "alerts", "low-stock"], &[]).await
    }

    pub async fn low_stock_for_item(&self, item_id: ItemId) -> Result<Vec<StockRecord>> {
        self.api
            .get(&["stocks", "alerts", "low-stock", &item_id.to_string()], &[])
            .await
    }

    pub async fn expiring(&self, days_ahead: u32) -> Result<Vec<StockRecord>> {
        self.api
            .get(
                &["stocks", "alerts", "expiring"],
                &[("daysAhead", days_ahead.to_string())],
            )
            .await
    }

    pub async fn expired(&self) -> Result<Vec<StockRecord>> {
        self.api.get(&["stocks", "alerts", "expired"], &[]).await
    }

    pub async fn status(&self, id: StockId) -> Result<StockStatus> {
        self.api
            .get(&["stocks", &id.to_string(), "status"], &[])
            .await
    }
}

/// `/purchaseHistories`
#[derive(Debug, Clone, Copy)]
pub struct Purchases<'a> {
    api: &'a ApiClient,
}

impl<'a> Purchases<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<PurchaseHistoryRecord>> {
        self.api.get(&["purchaseHistories"], &[]).await
    }

    pub async fn get(&self, id: PurchaseId) -> Result<PurchaseHistoryRecord> {
        self.api
            .get(&["purchaseHistories", &id.to_string()], &[])
            .await
    }

    pub async fn create(&self, draft: &NewPurchase) -> Result<PurchaseHistoryRecord> {
        self.api.post(&["purchaseHistories"], draft).await
    }

    pub async fn update(&self, id: PurchaseId, draft: &NewPurchase) -> Result<PurchaseHistoryRecord> {
        self.api
            .put(&["purchaseHistories", &id.to_string()], draft)
            .await
    }

    pub async fn delete(&self, id: PurchaseId) -> Result<()> {
        self.api
            .delete(&["purchaseHistories", &id.to_string()])
            .await
    }

    /// Newest first.
    pub async fn for_item(&self, item_id: ItemId) -> Result<Vec<PurchaseHistoryRecord>> {
        self.api
            .get(&["purchaseHistories", "item", &item_id.to_string()], &[])
            .await
    }

    pub async fn between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<PurchaseHistoryRecord>> {
        let fmt = "%Y-%m-%dT%H:%M:%S";
        self.api
            .get(
                &["purchaseHistories", "period"],
                &[
                    ("start", start.format(fmt).to_string()),
                    ("end", end.format(fmt).to_string()),
                ],
            )
            .await
    }
}
