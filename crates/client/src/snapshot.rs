use chrono::NaiveDate;

use stocktrack_inventory::{
    Category, CategoryFilter, InventoryRow, Item, ItemStockSummary, StockLot, Store,
    inventory_rows, summarize_all,
};

use crate::error::ClientError;
use crate::http::ApiClient;

/// Everything the status engine needs, as domain values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub stores: Vec<Store>,
    pub items: Vec<Item>,
    pub lots: Vec<StockLot>,
}

impl Snapshot {
    pub fn rows(&self, today: NaiveDate, filter: CategoryFilter) -> Vec<InventoryRow> {
        inventory_rows(
            &self.categories,
            &self.stores,
            &self.items,
            &self.lots,
            today,
            filter,
        )
    }

    pub fn summaries(&self, today: NaiveDate) -> Vec<ItemStockSummary> {
        summarize_all(&self.items, &self.lots, today)
    }
}

/// Fetch categories, stores, items and stock lots concurrently; the first
/// failure wins.
pub async fn fetch_snapshot(api: &ApiClient) -> Result<Snapshot, ClientError> {
    let (categories_api, stores_api, items_api, stocks_api) =
        (api.categories(), api.stores(), api.items(), api.stocks());
    let (categories, stores, items, lots) = tokio::try_join!(
        categories_api.list(),
        stores_api.list(),
        items_api.list(),
        stocks_api.list(),
    )?;

    tracing::debug!(
        categories = categories.len(),
        stores = stores.len(),
        items = items.len(),
        lots = lots.len(),
        "snapshot fetched"
    );

    Ok(Snapshot {
        categories: categories.into_iter().map(Category::from).collect(),
        stores: stores.into_iter().map(Store::from).collect(),
        items: items.into_iter().map(Item::from).collect(),
        lots: lots.into_iter().map(StockLot::from).collect(),
    })
}
