use chrono::{Days, NaiveDate, NaiveDateTime};

use stocktrack_core::DomainResult;
use stocktrack_infra::InventoryStore;
use stocktrack_inventory::{NewCategory, NewItem, NewPurchase, NewStockLot, NewStore};

/// Where handlers get "now" from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// The host's local wall clock.
    Local,
    /// A pinned instant; `today` is its date.
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::Local => chrono::Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Everything the handlers share.
#[derive(Debug)]
pub struct AppServices {
    store: InventoryStore,
    clock: Clock,
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}

impl AppServices {
    pub fn new() -> Self {
        Self::with_clock(Clock::Local)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            store: InventoryStore::new(),
            clock,
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Load a small household inventory whose lots are dated relative to today,
    /// so every status shows up at least once.
    pub fn seed_demo(&self) -> DomainResult<()> {
        let at = self.now();
        let today = self.today();
        let store = &self.store;
        let in_days = |n: u64| today.checked_add_days(Days::new(n)).unwrap_or(today);
        let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);

        let seasoning = store.create_category(NewCategory::new("Seasoning"), at)?;
        let frozen = store.create_category(NewCategory::new("Frozen food"), at)?;
        let daily = store.create_category(NewCategory::new("Daily goods"), at)?;

        let market = store.create_store(NewStore::new("Green Market").with_location("Station Rd"), at)?;
        let pharmacy = store.create_store(NewStore::new("Corner Pharmacy").with_location("Main St"), at)?;

        let soy = store.create_item(
            NewItem::new("Soy sauce", 1).in_category(seasoning.id).at_store(market.id).with_expiry(true),
            at,
        )?;
        let gyoza = store.create_item(
            NewItem::new("Frozen gyoza", 1).in_category(frozen.id).at_store(market.id).with_expiry(true),
            at,
        )?;
        let milk = store.create_item(
            NewItem::new("Milk", 1).in_category(daily.id).at_store(market.id).with_expiry(true),
            at,
        )?;
        let toothpaste = store.create_item(
            NewItem::new("Toothpaste", 2).in_category(daily.id).at_store(pharmacy.id),
            at,
        )?;
        store.create_item(NewItem::new("Batteries", 4).with_note("AA"), at)?;

        store.create_stock(NewStockLot::new(soy.id, 3).expiring_on(in_days(120)), at)?;
        store.create_stock(NewStockLot::new(gyoza.id, 2).expiring_on(in_days(2)), at)?;
        store.create_stock(NewStockLot::new(milk.id, 1).expiring_on(days_ago(1)), at)?;
        store.create_stock(NewStockLot::new(toothpaste.id, 1), at)?;

        let mut purchase = NewPurchase::new(soy.id, 3);
        purchase.store_id = Some(market.id);
        purchase.total_price = Some(450);
        store.create_purchase(purchase, at)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktrack_inventory::StockStatus;

    #[test]
    fn demo_covers_every_status() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        let services = AppServices::with_clock(Clock::Fixed(at));
        services.seed_demo().unwrap();

        let today = services.today();
        let statuses: Vec<StockStatus> = services
            .store()
            .list_items()
            .iter()
            .map(|i| services.store().item_summary(i.id, today).unwrap().status)
            .collect();

        for wanted in [
            StockStatus::Normal,
            StockStatus::LowStock,
            StockStatus::Expiring,
            StockStatus::Expired,
        ] {
            assert!(statuses.contains(&wanted), "missing {wanted}");
        }
    }

    #[test]
    fn fixed_clock_pins_today() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(Clock::Fixed(at).today(), at.date());
    }
}
