//! Reconciliation read model: ordered vs. received vs. pending, per line.
//!
//! A pure projection over an order and its receipts — it never mutates
//! state, so it is safe to call repeatedly and concurrently.

pub mod reconcile;

pub use reconcile::{reconcile, LineMatch, LineMatchStatus, ReconciliationSummary};
