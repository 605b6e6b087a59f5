//! Goods receipt (GRN) domain module.
//!
//! Receipts are an append-only delivery ledger against an approved purchase
//! order: created once, never updated or deleted while the order is live.
//! This crate owns the receipt record and the pure validation rules; the
//! store applies them under its write lock so the over-receipt check is
//! atomic per order.

pub mod receipt;

pub use receipt::{
    check_over_receipt, received_by_line, validate_items, GoodsReceipt, ReceiptDraft, ReceiptItem,
    ReceiptItemDraft,
};
