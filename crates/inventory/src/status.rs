//! Stock status derivation.
//!
//! Pure functions over an item and the full (unfiltered) collection of stock
//! lots. Nothing here reads the clock: the reference date is always passed in.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use stocktrack_core::{DomainError, Entity, ItemId};

use crate::model::{Item, StockLot};

/// Lots expiring within `[today, today + EXPIRING_WINDOW_DAYS]` mark an item as expiring.
pub const EXPIRING_WINDOW_DAYS: u32 = 3;

/// User-facing status of an item, derived at query time and never stored.
///
/// Variants are declared in increasing urgency, so `Ord` ranks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Normal,
    LowStock,
    Expiring,
    Expired,
}

impl StockStatus {
    /// Wire name (`NORMAL`, `LOW_STOCK`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Normal => "NORMAL",
            StockStatus::LowStock => "LOW_STOCK",
            StockStatus::Expiring => "EXPIRING",
            StockStatus::Expired => "EXPIRED",
        }
    }

    /// Short display text.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Normal => "OK",
            StockStatus::LowStock => "Low stock",
            StockStatus::Expiring => "Expiring soon",
            StockStatus::Expired => "Expired",
        }
    }

    /// Anything other than `Normal` needs the user's attention.
    pub fn is_alert(&self) -> bool {
        *self != StockStatus::Normal
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(StockStatus::Normal),
            "LOW_STOCK" => Ok(StockStatus::LowStock),
            "EXPIRING" => Ok(StockStatus::Expiring),
            "EXPIRED" => Ok(StockStatus::Expired),
            other => Err(DomainError::validation(format!("unknown stock status: {other}"))),
        }
    }
}

fn lots_of<'a>(item_id: ItemId, lots: &'a [StockLot]) -> impl Iterator<Item = &'a StockLot> + 'a {
    lots.iter().filter(move |lot| lot.belongs_to(item_id))
}

/// Sum of `quantity` over the item's lots; 0 when it has none.
///
/// Saturates at `i64::MAX` instead of overflowing.
pub fn total_quantity(item: &Item, lots: &[StockLot]) -> i64 {
    lots_of(item.id(), lots).fold(0i64, |acc, lot| acc.saturating_add(lot.quantity))
}

/// Earliest expiry date among the item's dated lots.
pub fn earliest_expiry(item: &Item, lots: &[StockLot]) -> Option<NaiveDate> {
    lots_of(item.id(), lots).filter_map(|lot| lot.expiry_date).min()
}

/// Classify an item using the default expiring window.
///
/// Priority, first match wins:
/// 1. `Expired`: some lot expires strictly before `today`.
/// 2. `Expiring`: some lot expires within `[today, today + 3 days]`.
/// 3. `LowStock`: total quantity `<= item.threshold`.
/// 4. `Normal`.
///
/// Lot quantities play no part in the expiry checks, and `item.has_expiry` is
/// not consulted: a dated lot on an item flagged "no expiry" still counts.
pub fn classify(item: &Item, lots: &[StockLot], today: NaiveDate) -> StockStatus {
    classify_with_window(item, lots, today, EXPIRING_WINDOW_DAYS)
}

/// [`classify`] with a caller-chosen expiring window (inclusive on both ends).
pub fn classify_with_window(
    item: &Item,
    lots: &[StockLot],
    today: NaiveDate,
    window_days: u32,
) -> StockStatus {
    let horizon = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);

    let dated: Vec<NaiveDate> = lots_of(item.id(), lots)
        .filter_map(|lot| lot.expiry_date)
        .collect();

    if dated.iter().any(|d| *d < today) {
        return StockStatus::Expired;
    }
    if dated.iter().any(|d| *d >= today && *d <= horizon) {
        return StockStatus::Expiring;
    }
    if total_quantity(item, lots) <= item.threshold {
        return StockStatus::LowStock;
    }
    StockStatus::Normal
}

/// Everything derived for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStockSummary {
    pub item_id: ItemId,
    pub total_quantity: i64,
    pub earliest_expiry: Option<NaiveDate>,
    pub status: StockStatus,
}

pub fn summarize(item: &Item, lots: &[StockLot], today: NaiveDate) -> ItemStockSummary {
    ItemStockSummary {
        item_id: item.id(),
        total_quantity: total_quantity(item, lots),
        earliest_expiry: earliest_expiry(item, lots),
        status: classify(item, lots, today),
    }
}

/// One summary per item, in the order the items were given.
pub fn summarize_all(items: &[Item], lots: &[StockLot], today: NaiveDate) -> Vec<ItemStockSummary> {
    items.iter().map(|item| summarize(item, lots, today)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stocktrack_core::StockId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 1, 10)
    }

    fn item(id: i64, threshold: i64) -> Item {
        Item::new(ItemId::new(id), format!("item-{id}"), threshold)
    }

    fn lot(id: i64, item_id: i64, quantity: i64, expiry: Option<NaiveDate>) -> StockLot {
        let lot = StockLot::new(StockId::new(id), ItemId::new(item_id), quantity);
        match expiry {
            Some(d) => lot.expiring_on(d),
            None => lot,
        }
    }

    #[test]
    fn item_without_lots_has_nothing_on_hand() {
        let it = item(1, 0);
        let lots = vec![lot(1, 2, 10, Some(date(2024, 1, 1)))];

        assert_eq!(total_quantity(&it, &lots), 0);
        assert_eq!(earliest_expiry(&it, &lots), None);
        assert_eq!(classify(&it, &lots, today()), StockStatus::LowStock);

        // 0 <= threshold holds for any non-negative threshold, so a lot-less item
        // with threshold 0 reads as low stock; a negative threshold reads as normal.
        assert_eq!(classify(&item(1, -1), &lots, today()), StockStatus::Normal);
    }

    #[test]
    fn huge_lot_quantities_saturate_instead_of_overflowing() {
        let it = item(1, 5);
        let lots = vec![lot(1, 1, i64::MAX, None), lot(2, 1, 1, None)];

        assert_eq!(total_quantity(&it, &lots), i64::MAX);
        assert_eq!(classify(&it, &lots, today()), StockStatus::Normal);
        assert_eq!(summarize(&it, &lots, today()).total_quantity, i64::MAX);
    }

    #[test]
    fn scenario_expired_lot_dominates() {
        let it = item(1, 5);
        let lots = vec![
            lot(1, 1, 3, Some(date(2024, 1, 8))),
            lot(2, 1, 4, None),
        ];
        assert_eq!(classify(&it, &lots, today()), StockStatus::Expired);
        assert_eq!(total_quantity(&it, &lots), 7);
    }

    #[test]
    fn scenario_expiring_within_window() {
        let it = item(2, 10);
        let lots = vec![lot(1, 2, 2, Some(date(2024, 1, 12)))];
        assert_eq!(classify(&it, &lots, today()), StockStatus::Expiring);
        assert_eq!(total_quantity(&it, &lots), 2);
    }

    #[test]
    fn scenario_low_stock_without_dates() {
        let it = item(3, 10);
        let lots = vec![lot(1, 3, 5, None)];
        assert_eq!(classify(&it, &lots, today()), StockStatus::LowStock);
        assert_eq!(total_quantity(&it, &lots), 5);
    }

    #[test]
    fn scenario_normal_far_from_expiry() {
        let it = item(4, 5);
        let lots = vec![lot(1, 4, 20, Some(date(2024, 2, 1)))];
        assert_eq!(classify(&it, &lots, today()), StockStatus::Normal);
        assert_eq!(total_quantity(&it, &lots), 20);
    }

    #[test]
    fn expiring_today_is_expiring_not_expired() {
        let it = item(1, 0);
        let lots = vec![lot(1, 1, 5, Some(today()))];
        assert_eq!(classify(&it, &lots, today()), StockStatus::Expiring);
    }

    #[test]
    fn expired_yesterday_is_expired() {
        let it = item(1, 0);
        let lots = vec![lot(1, 1, 5, today().pred_opt())];
        assert_eq!(classify(&it, &lots, today()), StockStatus::Expired);
    }

    #[test]
    fn window_upper_bound_is_inclusive() {
        let it = item(1, 0);
        let on_edge = vec![lot(1, 1, 5, Some(date(2024, 1, 13)))];
        let past_edge = vec![lot(1, 1, 5, Some(date(2024, 1, 14)))];

        assert_eq!(classify(&it, &on_edge, today()), StockStatus::Expiring);
        assert_eq!(classify(&it, &past_edge, today()), StockStatus::Normal);
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        let at = vec![lot(1, 1, 5, None)];
        let above = vec![lot(1, 1, 6, None)];
        assert_eq!(classify(&item(1, 5), &at, today()), StockStatus::LowStock);
        assert_eq!(classify(&item(1, 5), &above, today()), StockStatus::Normal);
    }

    #[test]
    fn empty_lot_still_counts_for_expiry() {
        let it = item(1, 0);
        let lots = vec![
            lot(1, 1, 0, Some(date(2024, 1, 2))),
            lot(2, 1, 50, None),
        ];
        assert_eq!(classify(&it, &lots, today()), StockStatus::Expired);
    }

    #[test]
    fn has_expiry_flag_does_not_suppress_dated_lots() {
        let it = item(1, 0).with_expiry(false);
        let lots = vec![lot(1, 1, 5, Some(date(2024, 1, 9)))];
        assert_eq!(classify(&it, &lots, today()), StockStatus::Expired);
    }

    #[test]
    fn earliest_expiry_skips_undated_lots() {
        let it = item(1, 0);
        let lots = vec![
            lot(1, 1, 1, None),
            lot(2, 1, 1, Some(date(2024, 3, 1))),
            lot(3, 1, 1, Some(date(2024, 2, 1))),
            lot(4, 9, 1, Some(date(2024, 1, 1))),
        ];
        assert_eq!(earliest_expiry(&it, &lots), Some(date(2024, 2, 1)));
    }

    #[test]
    fn custom_window_widens_expiring_range() {
        let it = item(1, 0);
        let lots = vec![lot(1, 1, 5, Some(date(2024, 1, 17)))];
        assert_eq!(classify_with_window(&it, &lots, today(), 3), StockStatus::Normal);
        assert_eq!(classify_with_window(&it, &lots, today(), 7), StockStatus::Expiring);
    }

    #[test]
    fn summarize_all_keeps_item_order() {
        let items = vec![item(2, 1), item(1, 1)];
        let lots = vec![lot(1, 1, 4, None), lot(2, 2, 1, Some(date(2024, 1, 11)))];

        let summaries = summarize_all(&items, &lots, today());
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].item_id, ItemId::new(2));
        assert_eq!(summaries[0].status, StockStatus::Expiring);
        assert_eq!(summaries[0].earliest_expiry, Some(date(2024, 1, 11)));
        assert_eq!(summaries[1].total_quantity, 4);
        assert_eq!(summaries[1].status, StockStatus::Normal);
    }

    #[test]
    fn status_wire_names_round_trip() {
        for status in [
            StockStatus::Normal,
            StockStatus::LowStock,
            StockStatus::Expiring,
            StockStatus::Expired,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<StockStatus>().unwrap(), status);
        }
        assert!("STALE".parse::<StockStatus>().is_err());
    }

    #[test]
    fn urgency_ordering() {
        assert!(StockStatus::Expired > StockStatus::Expiring);
        assert!(StockStatus::Expiring > StockStatus::LowStock);
        assert!(StockStatus::LowStock > StockStatus::Normal);
        assert!(!StockStatus::Normal.is_alert());
    }

    fn arb_lot(item_ids: i64) -> impl Strategy<Value = StockLot> {
        (1..=item_ids, 0i64..100, proptest::option::of(-10i64..20)).prop_map(
            |(item_id, quantity, offset)| {
                let mut l = StockLot::new(StockId::new(0), ItemId::new(item_id), quantity);
                l.expiry_date = offset.map(|o| today() + chrono::Duration::days(o));
                l
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the total is the plain sum of the item's lots, whatever their order.
        #[test]
        fn total_ignores_order_and_foreign_lots(
            lots in prop::collection::vec(arb_lot(3), 0..20),
            threshold in 0i64..50,
        ) {
            let it = item(1, threshold);
            let expected: i64 = lots.iter().filter(|l| l.item_id == ItemId::new(1)).map(|l| l.quantity).sum();

            let mut reversed = lots.clone();
            reversed.reverse();

            prop_assert_eq!(total_quantity(&it, &lots), expected);
            prop_assert_eq!(total_quantity(&it, &reversed), expected);
            prop_assert_eq!(classify(&it, &lots, today()), classify(&it, &reversed, today()));
        }

        /// Property: classification is idempotent for identical inputs.
        #[test]
        fn classify_is_idempotent(
            lots in prop::collection::vec(arb_lot(2), 0..20),
            threshold in 0i64..50,
        ) {
            let it = item(1, threshold);
            prop_assert_eq!(classify(&it, &lots, today()), classify(&it, &lots, today()));
        }

        /// Property: any expired lot wins over every other signal.
        #[test]
        fn expired_lot_always_wins(
            mut lots in prop::collection::vec(arb_lot(1), 0..20),
            days_ago in 1i64..30,
            threshold in 0i64..500,
        ) {
            let mut expired = StockLot::new(StockId::new(99), ItemId::new(1), 1000);
            expired.expiry_date = Some(today() - chrono::Duration::days(days_ago));
            lots.push(expired);

            prop_assert_eq!(classify(&item(1, threshold), &lots, today()), StockStatus::Expired);
        }
    }
}
