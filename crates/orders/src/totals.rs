//! Money/tax aggregation over order lines.
//!
//! Single authoritative implementation: any UI preview and the order store
//! both call [`compute_totals`]; the rounding/aggregation logic is never
//! duplicated elsewhere.
//!
//! Per-line amounts are carried at full precision; rounding (half-up, two
//! decimal places) is applied only to the three aggregate outputs, so
//! `total == subtotal + gst_amount` holds exactly.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use procura_core::{DomainError, DomainResult, ValueObject};

use crate::order::OrderLine;

/// GST percentage applied when a line does not specify one.
pub const DEFAULT_GST_RATE: Decimal = dec!(18);

/// Aggregate money amounts derived from an order's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub gst_amount: Decimal,
    pub total: Decimal,
}

impl ValueObject for OrderTotals {}

/// Round a money amount to two decimal places, half-up.
///
/// The result carries exactly two decimal places, so amounts serialize
/// uniformly ("1180.00", not "1180").
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Validate the numeric fields of a single line.
///
/// Quantity must be strictly positive, rate non-negative, GST rate within
/// [0, 100]. Violations are reported, never clamped.
pub fn validate_line(line: &OrderLine) -> DomainResult<()> {
    if line.quantity <= Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "line {}: quantity must be positive (got {})",
            line.index, line.quantity
        )));
    }
    if line.rate < Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "line {}: rate must not be negative (got {})",
            line.index, line.rate
        )));
    }
    if line.gst_rate < Decimal::ZERO || line.gst_rate > dec!(100) {
        return Err(DomainError::validation(format!(
            "line {}: gst_rate must be within [0, 100] (got {})",
            line.index, line.gst_rate
        )));
    }
    Ok(())
}

/// Compute subtotal, GST amount, and grand total from order lines.
///
/// Pure and deterministic. Line sums are accumulated at full precision;
/// each aggregate is rounded once at the end.
pub fn compute_totals(lines: &[OrderLine]) -> DomainResult<OrderTotals> {
    let mut subtotal = Decimal::ZERO;
    let mut gst_amount = Decimal::ZERO;

    for line in lines {
        validate_line(line)?;
        subtotal += line.line_amount();
        gst_amount += line.line_gst();
    }

    let subtotal = round_money(subtotal);
    let gst_amount = round_money(gst_amount);

    Ok(OrderTotals {
        subtotal,
        gst_amount,
        total: subtotal + gst_amount,
    })
}
