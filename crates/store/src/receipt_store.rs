use std::sync::Arc;

use procura_core::{DomainResult, OrderId};
use procura_receipts::{GoodsReceipt, ReceiptDraft};

/// Owns `GoodsReceipt` records: an append-only delivery ledger per order.
///
/// Implementations must make the over-receipt check and the write atomic per
/// order, so two concurrent partial receipts cannot jointly over-receive.
pub trait ReceiptStore: Send + Sync {
    /// Validate and append a receipt. Preconditions, in order, each failing
    /// with a distinct error: order exists (`NotFound`); order is approved
    /// (`InvalidState`); items non-empty with valid line indices and positive
    /// quantities (`Validation`); cumulative received within ordered
    /// quantities (`OverReceipt`). A rejected receipt is never persisted.
    fn append_receipt(&self, po_id: OrderId, draft: ReceiptDraft) -> DomainResult<GoodsReceipt>;

    /// Receipts for an order, ascending by creation time (delivery history
    /// order). Fails with `NotFound` for an unknown order.
    fn list_receipts(&self, po_id: OrderId) -> DomainResult<Vec<GoodsReceipt>>;
}

impl<S> ReceiptStore for Arc<S>
where
    S: ReceiptStore + ?Sized,
{
    fn append_receipt(&self, po_id: OrderId, draft: ReceiptDraft) -> DomainResult<GoodsReceipt> {
        (**self).append_receipt(po_id, draft)
    }

    fn list_receipts(&self, po_id: OrderId) -> DomainResult<Vec<GoodsReceipt>> {
        (**self).list_receipts(po_id)
    }
}
