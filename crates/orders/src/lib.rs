//! Purchase order domain module.
//!
//! This crate contains business rules for purchase orders — line validation,
//! money/tax aggregation, and the status state machine — implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;
pub mod totals;

pub use order::{
    LifecycleAction, LineDraft, OrderDraft, OrderLine, OrderStatus, PurchaseOrder,
};
pub use totals::{compute_totals, round_money, OrderTotals, DEFAULT_GST_RATE};
