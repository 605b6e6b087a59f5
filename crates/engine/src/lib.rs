//! Procurement service: the use-case layer tying the directory, the ledger
//! store, and the reconciliation projection together.
//!
//! Everything stateful lives behind the store traits; this crate only
//! orchestrates and enforces the cross-entity rules (vendor/project
//! resolution at order creation).

pub mod service;

pub use service::ProcurementService;
