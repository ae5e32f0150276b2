//! Inventory domain module.
//!
//! This crate contains the inventory data model and the rules that derive a
//! stock status from it, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage, no clock).

pub mod alerts;
pub mod draft;
pub mod listing;
pub mod model;
pub mod records;
pub mod status;

pub use draft::{NewCategory, NewItem, NewPurchase, NewStockLot, NewStore};
pub use listing::{CategoryFilter, InventoryRow, inventory_rows};
pub use model::{Category, Item, PurchaseRecord, StockLot, Store};
pub use records::{CategoryRecord, ItemRecord, PurchaseHistoryRecord, StockRecord, StoreRecord};
pub use status::{
    EXPIRING_WINDOW_DAYS, ItemStockSummary, StockStatus, classify, classify_with_window,
    earliest_expiry, summarize, summarize_all, total_quantity,
};
