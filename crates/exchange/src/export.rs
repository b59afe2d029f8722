//! Export contract: flat, serializable row shapes handed to an external
//! tabular encoder.
//!
//! This module defines row shape and field order only; CSV/XLSX encoding is
//! a collaborator concern. Serde renames reproduce the column headers the
//! exports use.

use chrono::{DateTime, Utc};
use serde::Serialize;

use partkeep_ledger::{MovementKind, Part};
use partkeep_report::{classify, quantity_to_order, StockStatus};

/// Part master-data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRow {
    pub name: String,
    pub part_number: String,
    pub description: String,
    pub category: String,
    pub supplier: String,
    pub location: String,
    pub quantity: i64,
    pub min_stock: i64,
    pub max_stock: i64,
}

pub fn part_rows(parts: &[Part]) -> Vec<PartRow> {
    parts
        .iter()
        .map(|part| PartRow {
            name: part.name().to_string(),
            part_number: part.part_number().to_string(),
            description: part.description().to_string(),
            category: part.category().to_string(),
            supplier: part.supplier().to_string(),
            location: part.location().to_string(),
            quantity: part.quantity(),
            min_stock: part.min_stock(),
            max_stock: part.max_stock(),
        })
        .collect()
}

/// Status row with reorder suggestion and lifetime opname adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    #[serde(rename = "Part Name")]
    pub part_name: String,
    #[serde(rename = "Part Number")]
    pub part_number: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Current Quantity")]
    pub current_quantity: i64,
    #[serde(rename = "Status")]
    pub status: StockStatus,
    #[serde(rename = "Quantity to Order")]
    pub quantity_to_order: i64,
    #[serde(rename = "Total Stock Opname Adjustment")]
    pub total_adjustment: i64,
}

pub fn status_rows(parts: &[Part]) -> Vec<StatusRow> {
    parts
        .iter()
        .map(|part| {
            // Lifetime sum, not windowed: the column answers "how much has
            // opname ever corrected this part".
            let total_adjustment = part
                .stock_history()
                .iter()
                .filter(|log| log.kind == MovementKind::Adjustment)
                .map(|log| log.quantity_change)
                .sum();

            StatusRow {
                part_name: part.name().to_string(),
                part_number: part.part_number().to_string(),
                category: part.category().to_string(),
                current_quantity: part.quantity(),
                status: classify(part),
                quantity_to_order: quantity_to_order(part),
                total_adjustment,
            }
        })
        .collect()
}

/// One history row per ledger entry, across all parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    #[serde(rename = "Part Name")]
    pub part_name: String,
    #[serde(rename = "Part Number")]
    pub part_number: String,
    #[serde(rename = "Date")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Type")]
    pub kind: MovementKind,
    #[serde(rename = "Quantity Change")]
    pub quantity_change: i64,
}

/// Flatten every part's history into rows, newest first.
pub fn history_rows(parts: &[Part]) -> Vec<HistoryRow> {
    let mut rows: Vec<HistoryRow> = parts
        .iter()
        .flat_map(|part| {
            part.stock_history().iter().map(|log| HistoryRow {
                part_name: part.name().to_string(),
                part_number: part.part_number().to_string(),
                timestamp: log.timestamp,
                kind: log.kind,
                quantity_change: log.quantity_change,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use partkeep_core::PartId;
    use partkeep_ledger::PartSpec;

    fn spec(name: &str, quantity: i64, min_stock: i64, max_stock: i64) -> PartSpec {
        PartSpec {
            name: name.to_string(),
            part_number: format!("PN-{name}"),
            description: String::new(),
            category: "General".to_string(),
            supplier: "Acme".to_string(),
            location: "A1".to_string(),
            quantity,
            min_stock,
            max_stock,
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn part_rows_serialize_with_the_data_export_field_order() {
        let part = Part::create(PartId::new(), spec("widget", 4, 1, 10)).unwrap();
        let json = serde_json::to_string(&part_rows(std::slice::from_ref(&part))).unwrap();

        let name_pos = json.find("\"name\"").unwrap();
        let quantity_pos = json.find("\"quantity\"").unwrap();
        let max_pos = json.find("\"maxStock\"").unwrap();
        assert!(name_pos < quantity_pos && quantity_pos < max_pos);
    }

    #[test]
    fn status_rows_carry_classification_reorder_and_lifetime_adjustment() {
        let mut part = Part::create(PartId::new(), spec("widget", 10, 5, 20)).unwrap();
        part.apply_movement(-4, MovementKind::Adjustment, at(2)).unwrap();
        part.apply_movement(-3, MovementKind::Adjustment, at(3)).unwrap();

        let rows = status_rows(std::slice::from_ref(&part));
        let row = &rows[0];
        assert_eq!(row.current_quantity, 3);
        assert_eq!(row.status, StockStatus::LowStock);
        assert_eq!(row.quantity_to_order, 17);
        assert_eq!(row.total_adjustment, -7);
    }

    #[test]
    fn status_row_headers_match_the_original_columns() {
        let part = Part::create(PartId::new(), spec("widget", 10, 5, 20)).unwrap();
        let json = serde_json::to_value(&status_rows(std::slice::from_ref(&part))).unwrap();
        let row = &json[0];
        assert_eq!(row["Part Name"], "widget");
        assert_eq!(row["Status"], "OK");
        assert_eq!(row["Quantity to Order"], 0);
        assert_eq!(row["Total Stock Opname Adjustment"], 0);
    }

    #[test]
    fn history_rows_flatten_all_parts_newest_first() {
        let mut a = Part::create(PartId::new(), spec("a", 10, 0, 0)).unwrap();
        a.apply_movement(1, MovementKind::In, at(1)).unwrap();
        a.apply_movement(-2, MovementKind::Out, at(9)).unwrap();
        let mut b = Part::create(PartId::new(), spec("b", 10, 0, 0)).unwrap();
        b.apply_movement(3, MovementKind::In, at(5)).unwrap();

        let rows = history_rows(&[a, b]);
        let days: Vec<u32> = rows
            .iter()
            .map(|row| {
                use chrono::Datelike;
                row.timestamp.day()
            })
            .collect();
        assert_eq!(days, vec![9, 5, 1]);
    }

    #[test]
    fn history_rows_are_empty_for_parts_without_movements() {
        let part = Part::create(PartId::new(), spec("widget", 4, 0, 0)).unwrap();
        assert!(history_rows(std::slice::from_ref(&part)).is_empty());
    }
}
