use std::sync::Arc;

use procura_core::{DomainResult, OrderId};
use procura_orders::{LifecycleAction, OrderDraft, PurchaseOrder};

/// Owns `PurchaseOrder` records and their status.
///
/// Implementations must serialize `transition` per order id (compare-and-swap
/// or equivalent) so that two concurrent conflicting transitions yield
/// exactly one winner.
pub trait OrderStore: Send + Sync {
    /// Validate the draft, assign a unique `po_number`, and persist the
    /// order with status `pending` and lines frozen.
    fn create_order(&self, draft: OrderDraft) -> DomainResult<PurchaseOrder>;

    /// Fails with `NotFound` for an unknown id.
    fn get_order(&self, id: OrderId) -> DomainResult<PurchaseOrder>;

    /// All orders, in creation order.
    fn list_orders(&self) -> DomainResult<Vec<PurchaseOrder>>;

    /// Apply a lifecycle action under the store's serialization guarantee.
    /// Status is the only field that changes.
    fn transition_order(&self, id: OrderId, action: LifecycleAction)
        -> DomainResult<PurchaseOrder>;

    /// Hard-delete an order and cascade deletion of its receipts.
    ///
    /// Fails with `InvalidState` when the order is closed — closed orders
    /// are permanent records.
    fn delete_order(&self, id: OrderId) -> DomainResult<()>;
}

impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    fn create_order(&self, draft: OrderDraft) -> DomainResult<PurchaseOrder> {
        (**self).create_order(draft)
    }

    fn get_order(&self, id: OrderId) -> DomainResult<PurchaseOrder> {
        (**self).get_order(id)
    }

    fn list_orders(&self) -> DomainResult<Vec<PurchaseOrder>> {
        (**self).list_orders()
    }

    fn transition_order(
        &self,
        id: OrderId,
        action: LifecycleAction,
    ) -> DomainResult<PurchaseOrder> {
        (**self).transition_order(id, action)
    }

    fn delete_order(&self, id: OrderId) -> DomainResult<()> {
        (**self).delete_order(id)
    }
}
