use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use procura_core::ValueObject;
use procura_orders::PurchaseOrder;
use procura_receipts::{received_by_line, GoodsReceipt};

/// Fulfillment classification for one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMatchStatus {
    /// `received >= ordered`.
    Complete,
    /// `0 < received < ordered`.
    Partial,
    /// `received == 0`.
    Pending,
}

/// Three-way matching result for one order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMatch {
    pub line_index: u32,
    pub description: String,
    pub ordered: Decimal,
    pub received: Decimal,
    pub pending: Decimal,
    pub status: LineMatchStatus,
}

impl ValueObject for LineMatch {}

/// Order-level reconciliation view, one entry per line in line-index order.
///
/// `complete` and `completion_percent` are advisory: closure is a manual
/// caller decision and is never gated on them (partial shipments sometimes
/// never complete and the order is closed anyway).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub lines: Vec<LineMatch>,
    pub complete: bool,
    pub completion_percent: Decimal,
}

impl ValueObject for ReconciliationSummary {}

/// Project per-line matching state from an order and all of its receipts.
///
/// Receipts covering unknown line indices cannot exist (the store validates
/// on append), so every receipt item lands on a known line.
pub fn reconcile(order: &PurchaseOrder, receipts: &[GoodsReceipt]) -> ReconciliationSummary {
    let received = received_by_line(receipts);

    let mut ordered_total = Decimal::ZERO;
    let mut covered_total = Decimal::ZERO;

    let lines: Vec<LineMatch> = order
        .lines()
        .iter()
        .map(|line| {
            let received = received
                .get(&line.index)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let pending = (line.quantity - received).max(Decimal::ZERO);
            let status = if received >= line.quantity {
                LineMatchStatus::Complete
            } else if received > Decimal::ZERO {
                LineMatchStatus::Partial
            } else {
                LineMatchStatus::Pending
            };

            ordered_total += line.quantity;
            covered_total += received.min(line.quantity);

            LineMatch {
                line_index: line.index,
                description: line.description.clone(),
                ordered: line.quantity,
                received,
                pending,
                status,
            }
        })
        .collect();

    let complete = lines.iter().all(|l| l.status == LineMatchStatus::Complete);
    let mut completion_percent = if ordered_total.is_zero() {
        Decimal::ZERO
    } else {
        (covered_total / ordered_total * Decimal::ONE_HUNDRED).round_dp(1)
    };
    // Pin the scale so the percentage always serializes with one decimal
    // place ("100.0", not "100").
    completion_percent.rescale(1);

    ReconciliationSummary {
        lines,
        complete,
        completion_percent,
    }
}
