//! HTTP surface of the procurement ledger (axum).

pub mod app;
