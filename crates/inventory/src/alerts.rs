//! Lot-level alert queries.
//!
//! Unlike the item classification in [`crate::status`], these work per lot and
//! skip empty lots: an empty lot has nothing left to use up or throw away.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use stocktrack_core::{Entity, ItemId};

use crate::model::{Item, StockLot};
use crate::status::{EXPIRING_WINDOW_DAYS, StockStatus};

/// Default look-ahead for [`expiring_lots`].
pub const DEFAULT_DAYS_AHEAD: u32 = EXPIRING_WINDOW_DAYS;

/// Saturating sum over the item's non-empty lots; `None` when there are none.
fn on_hand(item_id: ItemId, lots: &[StockLot]) -> Option<i64> {
    lots.iter()
        .filter(|lot| lot.belongs_to(item_id) && lot.quantity > 0)
        .map(|lot| lot.quantity)
        .reduce(i64::saturating_add)
}

fn at_or_below_threshold(item: &Item, lots: &[StockLot]) -> bool {
    on_hand(item.id(), lots).is_some_and(|total| total <= item.threshold)
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Non-empty lots whose item's on-hand total is at or below its threshold.
///
/// Lots referencing an item missing from `items` are skipped.
pub fn low_stock_lots<'a>(items: &[Item], lots: &'a [StockLot]) -> Vec<&'a StockLot> {
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|i| (i.id(), i)).collect();
    let mut low: HashMap<ItemId, bool> = HashMap::new();

    lots.iter()
        .filter(|lot| lot.quantity > 0)
        .filter(|lot| {
            let Some(item) = by_id.get(&lot.item_id) else {
                return false;
            };
            *low.entry(lot.item_id)
                .or_insert_with(|| at_or_below_threshold(item, lots))
        })
        .collect()
}

/// Non-empty dated lots expiring on or before `today + days_ahead`.
///
/// Already-expired lots are included; use [`expired_lots`] to single them out.
pub fn expiring_lots(lots: &[StockLot], today: NaiveDate, days_ahead: u32) -> Vec<&StockLot> {
    let horizon = add_days(today, days_ahead);
    lots.iter()
        .filter(|lot| lot.quantity > 0)
        .filter(|lot| lot.expiry_date.is_some_and(|d| d <= horizon))
        .collect()
}

/// Non-empty lots whose expiry date is strictly before `today`.
pub fn expired_lots(lots: &[StockLot], today: NaiveDate) -> Vec<&StockLot> {
    lots.iter()
        .filter(|lot| lot.quantity > 0)
        .filter(|lot| lot.expiry_date.is_some_and(|d| d < today))
        .collect()
}

/// The item's lots, earliest expiry first; undated lots go last.
pub fn lots_by_expiry(item_id: ItemId, lots: &[StockLot]) -> Vec<&StockLot> {
    let mut out: Vec<&StockLot> = lots.iter().filter(|lot| lot.belongs_to(item_id)).collect();
    out.sort_by_key(|lot| (lot.expiry_date.is_none(), lot.expiry_date, lot.id));
    out
}

/// Status of a single lot.
///
/// Looks at this lot's own date only: `Expired` before `today`, `Expiring`
/// before `today + 3` (exclusive). Otherwise falls back to the item's on-hand
/// total against its threshold; an item with no non-empty lot has no on-hand
/// total and reads as `Normal`.
pub fn lot_status(lot: &StockLot, item: &Item, lots: &[StockLot], today: NaiveDate) -> StockStatus {
    if let Some(expiry) = lot.expiry_date {
        if expiry < today {
            return StockStatus::Expired;
        }
        if expiry < add_days(today, EXPIRING_WINDOW_DAYS) {
            return StockStatus::Expiring;
        }
    }

    if at_or_below_threshold(item, lots) {
        StockStatus::LowStock
    } else {
        StockStatus::Normal
    }
}
