//! Rows for the inventory list screen.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use stocktrack_core::{CategoryId, Entity, ItemId, StoreId};

use crate::model::{Category, Item, StockLot, Store};
use crate::status::{self, StockStatus};

/// Which items the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => item.category_id == Some(*id),
        }
    }
}

impl From<Option<CategoryId>> for CategoryFilter {
    fn from(value: Option<CategoryId>) -> Self {
        value.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

/// One line of the list: the item, where it belongs, and its derived stock figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub item_id: ItemId,
    pub name: String,
    pub category: Option<String>,
    pub store: Option<String>,
    pub has_expiry: bool,
    pub threshold: i64,
    pub total_quantity: i64,
    pub earliest_expiry: Option<NaiveDate>,
    pub status: StockStatus,
}

pub fn inventory_rows(
    categories: &[Category],
    stores: &[Store],
    items: &[Item],
    lots: &[StockLot],
    today: NaiveDate,
    filter: CategoryFilter,
) -> Vec<InventoryRow> {
    let category_names: HashMap<CategoryId, &str> =
        categories.iter().map(|c| (c.id(), c.name.as_str())).collect();
    let store_names: HashMap<StoreId, &str> =
        stores.iter().map(|s| (s.id(), s.name.as_str())).collect();

    items
        .iter()
        .filter(|item| filter.matches(item))
        .map(|item| {
            let summary = status::summarize(item, lots, today);
            InventoryRow {
                item_id: item.id(),
                name: item.name.clone(),
                category: item
                    .category_id
                    .and_then(|id| category_names.get(&id))
                    .map(|name| (*name).to_string()),
                store: item
                    .store_id
                    .and_then(|id| store_names.get(&id))
                    .map(|name| (*name).to_string()),
                has_expiry: item.has_expiry,
                threshold: item.threshold,
                total_quantity: summary.total_quantity,
                earliest_expiry: summary.earliest_expiry,
                status: summary.status,
            }
        })
        .collect()
}

/// Count of rows per status, most urgent first; statuses with no rows are omitted.
pub fn status_counts(rows: &[InventoryRow]) -> Vec<(StockStatus, usize)> {
    let mut counts: HashMap<StockStatus, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.status).or_default() += 1;
    }
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.0.cmp(&a.0));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktrack_core::StockId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn fixture() -> (Vec<Category>, Vec<Store>, Vec<Item>, Vec<StockLot>) {
        let seasoning = Category::new(CategoryId::new(1), "Seasoning");
        let frozen = Category::new(CategoryId::new(2), "Frozen food");
        let market = Store::new(StoreId::new(1), "Market");

        let items = vec![
            Item::new(ItemId::new(1), "Soy sauce", 3)
                .with_category(seasoning.id)
                .with_store(market.id),
            Item::new(ItemId::new(2), "Frozen gyoza", 1)
                .with_category(frozen.id)
                .with_expiry(true),
            Item::new(ItemId::new(3), "Loose batteries", 0),
        ];
        let lots = vec![
            StockLot::new(StockId::new(1), ItemId::new(1), 2),
            StockLot::new(StockId::new(2), ItemId::new(2), 6)
                .expiring_on(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()),
            StockLot::new(StockId::new(3), ItemId::new(3), 4),
        ];

        (vec![seasoning, frozen], vec![market], items, lots)
    }

    #[test]
    fn all_filter_lists_every_item_with_names_resolved() {
        let (categories, stores, items, lots) = fixture();
        let rows = inventory_rows(&categories, &stores, &items, &lots, today(), CategoryFilter::All);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].category.as_deref(), Some("Seasoning"));
        assert_eq!(rows[0].store.as_deref(), Some("Market"));
        assert_eq!(rows[0].status, StockStatus::LowStock);
        assert_eq!(rows[1].status, StockStatus::Expiring);
        assert_eq!(rows[2].category, None);
        assert_eq!(rows[2].status, StockStatus::Normal);
    }

    #[test]
    fn category_filter_keeps_only_matching_items() {
        let (categories, stores, items, lots) = fixture();
        let rows = inventory_rows(
            &categories,
            &stores,
            &items,
            &lots,
            today(),
            CategoryFilter::Only(CategoryId::new(2)),
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Frozen gyoza");
        assert_eq!(rows[0].total_quantity, 6);
    }

    #[test]
    fn uncategorized_items_never_match_a_category() {
        let item = Item::new(ItemId::new(1), "Spare", 0);
        assert!(CategoryFilter::All.matches(&item));
        assert!(!CategoryFilter::Only(CategoryId::new(1)).matches(&item));
        assert_eq!(CategoryFilter::from(None), CategoryFilter::All);
    }

    #[test]
    fn counts_are_ordered_by_urgency() {
        let (categories, stores, items, lots) = fixture();
        let rows = inventory_rows(&categories, &stores, &items, &lots, today(), CategoryFilter::All);

        assert_eq!(
            status_counts(&rows),
            vec![
                (StockStatus::Expiring, 1),
                (StockStatus::LowStock, 1),
                (StockStatus::Normal, 1),
            ]
        );
    }
}
