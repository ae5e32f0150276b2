use std::str::FromStr;

use axum::http::StatusCode;
use chrono::NaiveDateTime;
use serde::Deserialize;

use stocktrack_infra::InventoryStore;
use stocktrack_inventory::{
    Item, ItemRecord, PurchaseHistoryRecord, PurchaseRecord, StockLot, StockRecord,
    alerts::DEFAULT_DAYS_AHEAD,
};

use crate::app::errors;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct KeywordQuery {
    #[serde(default)]
    pub keyword: String,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringQuery {
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_days_ahead() -> u32 {
    DEFAULT_DAYS_AHEAD
}

/// `start`/`end` are ISO-8601 local date-times (`2024-01-31T18:00:00`).
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

// -------------------------
// Path parsing
// -------------------------

/// Parse a path segment, answering `400 invalid_id` when it is not a `T`.
pub fn parse_path<T: FromStr>(raw: &str, what: &str) -> Result<T, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("invalid {what}: {raw}"))
    })
}

pub fn parse_period_bound(raw: Option<&str>, name: &str) -> Result<NaiveDateTime, axum::response::Response> {
    let raw = raw.ok_or_else(|| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", format!("{name} is required"))
    })?;
    raw.parse().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("{name} is not a date-time: {raw}"),
        )
    })
}

// -------------------------
// Record mapping
// -------------------------

/// Expand an item's references; dangling ones are dropped.
pub fn item_record(store: &InventoryStore, item: &Item) -> ItemRecord {
    let category = item.category_id.and_then(|id| store.category(id).ok());
    let shop = item.store_id.and_then(|id| store.store(id).ok());
    ItemRecord::new(item, category.as_ref(), shop.as_ref())
}

pub fn item_records(store: &InventoryStore, items: &[Item]) -> Vec<ItemRecord> {
    items.iter().map(|i| item_record(store, i)).collect()
}

pub fn stock_record(store: &InventoryStore, lot: &StockLot) -> Option<StockRecord> {
    let item = store.item(lot.item_id).ok()?;
    Some(StockRecord::new(lot, item_record(store, &item)))
}

pub fn stock_records(store: &InventoryStore, lots: &[StockLot]) -> Vec<StockRecord> {
    lots.iter().filter_map(|l| stock_record(store, l)).collect()
}

pub fn purchase_record(store: &InventoryStore, purchase: &PurchaseRecord) -> Option<PurchaseHistoryRecord> {
    let item = store.item(purchase.item_id).ok()?;
    let shop = purchase.store_id.and_then(|id| store.store(id).ok());
    Some(PurchaseHistoryRecord::new(
        purchase,
        item_record(store, &item),
        shop.as_ref(),
    ))
}

pub fn purchase_records(store: &InventoryStore, purchases: &[PurchaseRecord]) -> Vec<PurchaseHistoryRecord> {
    purchases.iter().filter_map(|p| purchase_record(store, p)).collect()
}
