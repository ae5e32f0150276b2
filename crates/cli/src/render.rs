//! Plain-text tables for the terminal.

use std::fmt::Write;

use stocktrack_core::Entity;
use stocktrack_inventory::{InventoryRow, Item, StockLot, StockStatus};

const NONE: &str = "-";

/// Rows whose status needs attention, most urgent first.
pub fn needing_attention(rows: Vec<InventoryRow>) -> Vec<InventoryRow> {
    let mut out: Vec<_> = rows.into_iter().filter(|r| r.status.is_alert()).collect();
    out.sort_by(|a, b| b.status.cmp(&a.status).then(a.item_id.cmp(&b.item_id)));
    out
}

pub fn inventory_table(rows: &[InventoryRow]) -> String {
    if rows.is_empty() {
        return "No items.\n".to_string();
    }

    let name_w = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let cat_w = rows
        .iter()
        .map(|r| r.category.as_deref().unwrap_or(NONE).chars().count())
        .max()
        .unwrap_or(0)
        .max("CATEGORY".len());

    let mut s = String::new();
    let _ = writeln!(
        s,
        "{:<name_w$}  {:<cat_w$}  {:>5}  {:<10}  STATUS",
        "NAME", "CATEGORY", "QTY", "EXPIRES"
    );
    for r in rows {
        let expires = r
            .earliest_expiry
            .map(|d| d.to_string())
            .unwrap_or_else(|| NONE.to_string());
        let _ = writeln!(
            s,
            "{:<name_w$}  {:<cat_w$}  {:>5}  {:<10}  {}",
            r.name,
            r.category.as_deref().unwrap_or(NONE),
            r.total_quantity,
            expires,
            r.status.label()
        );
    }
    s
}

/// `3 items: 1 Expired, 2 OK`
pub fn status_line(counts: &[(StockStatus, usize)]) -> String {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let parts: Vec<String> = counts
        .iter()
        .map(|(status, n)| format!("{n} {}", status.label()))
        .collect();
    if parts.is_empty() {
        format!("{total} items")
    } else {
        format!("{total} items: {}", parts.join(", "))
    }
}

pub fn expiring_lots(items: &[Item], lots: &[&StockLot], days_ahead: u32) -> String {
    let mut s = String::new();
    if lots.is_empty() {
        let _ = writeln!(s, "No lots expire within {days_ahead} days.");
        return s;
    }
    let _ = writeln!(s, "Lots expiring within {days_ahead} days:");
    for lot in lots {
        let name = items
            .iter()
            .find(|i| i.is(lot.item_id))
            .map(|i| i.name.as_str())
            .unwrap_or(NONE);
        let date = lot.expiry_date.map(|d| d.to_string()).unwrap_or_default();
        let _ = writeln!(s, "  {date}  {name} x{}", lot.quantity);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stocktrack_core::{ItemId, StockId};

    fn row(id: i64, name: &str, status: StockStatus) -> InventoryRow {
        InventoryRow {
            item_id: ItemId::new(id),
            name: name.to_string(),
            category: None,
            store: None,
            has_expiry: false,
            threshold: 1,
            total_quantity: 2,
            earliest_expiry: None,
            status,
        }
    }

    #[test]
    fn attention_list_drops_normal_and_ranks_by_urgency() {
        let rows = vec![
            row(1, "Rice", StockStatus::Normal),
            row(2, "Batteries", StockStatus::LowStock),
            row(3, "Milk", StockStatus::Expired),
        ];
        let names: Vec<_> = needing_attention(rows).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Milk", "Batteries"]);
    }

    #[test]
    fn table_shows_labels_and_placeholders() {
        let table = inventory_table(&[row(1, "Soy sauce", StockStatus::Expiring)]);
        let lines: Vec<_> = table.lines().collect();
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].contains("Soy sauce"));
        assert!(lines[1].contains(" - "));
        assert!(lines[1].ends_with("Expiring soon"));
        assert_eq!(inventory_table(&[]), "No items.\n");
    }

    #[test]
    fn status_line_totals() {
        let counts = [(StockStatus::Expired, 1), (StockStatus::Normal, 2)];
        assert_eq!(status_line(&counts), "3 items: 1 Expired, 2 OK");
        assert_eq!(status_line(&[]), "0 items");
    }

    #[test]
    fn expiring_lots_name_their_item() {
        let items = vec![Item::new(ItemId::new(1), "Milk", 1)];
        let lot = StockLot::new(StockId::new(1), ItemId::new(1), 2)
            .expiring_on(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        let text = expiring_lots(&items, &[&lot], 3);
        assert!(text.contains("2024-01-12  Milk x2"));
        assert_eq!(expiring_lots(&items, &[], 3), "No lots expire within 3 days.\n");
    }
}
