use chrono::{DateTime, Utc};
use serde::Serialize;

use partkeep_core::PartId;
use partkeep_ledger::{MovementKind, Part};

/// One derived report row. Not persisted; part fields are denormalized at
/// generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub part_id: PartId,
    pub name: String,
    pub part_number: String,
    /// Sum of `in` quantity changes inside the window.
    pub stock_in: i64,
    /// Sum of the absolute values of `out` quantity changes inside the window.
    pub stock_out: i64,
    /// Signed sum of `adjustment` quantity changes inside the window.
    pub adjustment: i64,
    pub current_stock: i64,
}

/// Derive movement summaries for the window `[start, end]`, inclusive on
/// both ends.
///
/// Parts with no matching-window activity are omitted. Output order is the
/// input iteration order; sorting is a presentation concern.
///
/// `current_stock` is the part's live quantity at generation time, not the
/// quantity reconstructed as of `end`: a report over a past window shows
/// present-day stock.
pub fn generate_report(
    parts: &[Part],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<ReportRow> {
    parts
        .iter()
        .filter_map(|part| {
            let mut stock_in = 0i64;
            let mut stock_out = 0i64;
            let mut adjustment = 0i64;

            for log in part.stock_history() {
                if log.timestamp < start || log.timestamp > end {
                    continue;
                }
                match log.kind {
                    MovementKind::In => stock_in += log.quantity_change,
                    MovementKind::Out => stock_out += log.quantity_change.abs(),
                    MovementKind::Adjustment => adjustment += log.quantity_change,
                }
            }

            if stock_in > 0 || stock_out > 0 || adjustment != 0 {
                Some(ReportRow {
                    part_id: part.id(),
                    name: part.name().to_string(),
                    part_number: part.part_number().to_string(),
                    stock_in,
                    stock_out,
                    adjustment,
                    current_stock: part.quantity(),
                })
            } else {
                None
            }
        })
        .collect()
}
