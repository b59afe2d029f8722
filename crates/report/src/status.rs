use serde::Serialize;

use partkeep_ledger::Part;

/// Point-in-time stock classification.
///
/// Serialized/displayed with the labels the status export uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Overstock")]
    Overstock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Ok => "OK",
            StockStatus::LowStock => "Low Stock",
            StockStatus::Overstock => "Overstock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a part from its current fields only (no history access).
///
/// `LowStock` wins over `Overstock` when both could apply; a `max_stock` of
/// zero means "no ceiling", so it never triggers `Overstock`. Both the
/// status display and the status export call this, so the two consumers
/// cannot disagree.
pub fn classify(part: &Part) -> StockStatus {
    if part.quantity() <= part.min_stock() {
        StockStatus::LowStock
    } else if part.max_stock() > 0 && part.quantity() > part.max_stock() {
        StockStatus::Overstock
    } else {
        StockStatus::Ok
    }
}

/// Suggested reorder quantity for the status export.
///
/// Refills a low part up to `max_stock`; with no ceiling configured there is
/// no refill target, so the suggestion is zero. Never negative.
pub fn quantity_to_order(part: &Part) -> i64 {
    if classify(part) != StockStatus::LowStock {
        return 0;
    }
    let ceiling = if part.max_stock() > 0 {
        part.max_stock()
    } else {
        part.quantity()
    };
    (ceiling - part.quantity()).max(0)
}
