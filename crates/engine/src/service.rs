use std::sync::Arc;

use procura_core::{DomainError, DomainResult, OrderId};
use procura_directory::{ProjectLookup, VendorLookup};
use procura_orders::{LifecycleAction, OrderDraft, PurchaseOrder};
use procura_receipts::{GoodsReceipt, ReceiptDraft};
use procura_recon::{reconcile, ReconciliationSummary};
use procura_store::{OrderStore, ReceiptStore};

/// Use-case facade over the procurement ledger.
///
/// Generic over the ledger so tests can swap implementations; vendor and
/// project lookups are trait objects because the directory is read-only
/// reference data here.
pub struct ProcurementService<S> {
    ledger: Arc<S>,
    vendors: Arc<dyn VendorLookup>,
    projects: Arc<dyn ProjectLookup>,
}

impl<S> ProcurementService<S>
where
    S: OrderStore + ReceiptStore,
{
    pub fn new(
        ledger: Arc<S>,
        vendors: Arc<dyn VendorLookup>,
        projects: Arc<dyn ProjectLookup>,
    ) -> Self {
        Self {
            ledger,
            vendors,
            projects,
        }
    }

    /// Create a purchase order after resolving its vendor and project.
    ///
    /// An unknown vendor, an inactive vendor, and an unknown project are all
    /// `Validation` failures: the draft itself references something it must
    /// not, exactly like a bad quantity.
    pub fn create_order(&self, draft: OrderDraft) -> DomainResult<PurchaseOrder> {
        let vendor = self
            .vendors
            .vendor(draft.vendor_id)
            .ok_or_else(|| {
                DomainError::validation(format!("unknown vendor {}", draft.vendor_id))
            })?;
        if !vendor.active {
            return Err(DomainError::validation(format!(
                "vendor {} ({}) is inactive",
                vendor.name, vendor.id
            )));
        }
        if self.projects.project(draft.project_id).is_none() {
            return Err(DomainError::validation(format!(
                "unknown project {}",
                draft.project_id
            )));
        }

        let order = self.ledger.create_order(draft)?;
        tracing::info!(
            po_number = order.po_number(),
            vendor = %vendor.name,
            total = %order.total(),
            "purchase order issued"
        );
        Ok(order)
    }

    pub fn get_order(&self, id: OrderId) -> DomainResult<PurchaseOrder> {
        self.ledger.get_order(id)
    }

    pub fn list_orders(&self) -> DomainResult<Vec<PurchaseOrder>> {
        self.ledger.list_orders()
    }

    pub fn approve_order(&self, id: OrderId) -> DomainResult<PurchaseOrder> {
        self.transition(id, LifecycleAction::Approve)
    }

    pub fn reject_order(&self, id: OrderId) -> DomainResult<PurchaseOrder> {
        self.transition(id, LifecycleAction::Reject)
    }

    /// Close an order. Closure marks administrative completion and is never
    /// gated on full delivery; the reconciliation report stays available
    /// afterwards and shows whatever shortfall exists.
    pub fn close_order(&self, id: OrderId) -> DomainResult<PurchaseOrder> {
        self.transition(id, LifecycleAction::Close)
    }

    fn transition(&self, id: OrderId, action: LifecycleAction) -> DomainResult<PurchaseOrder> {
        let order = self.ledger.transition_order(id, action);
        if let Err(err) = &order {
            tracing::warn!(order_id = %id, %action, %err, "lifecycle transition rejected");
        }
        order
    }

    pub fn delete_order(&self, id: OrderId) -> DomainResult<()> {
        self.ledger.delete_order(id)
    }

    pub fn create_receipt(&self, po_id: OrderId, draft: ReceiptDraft) -> DomainResult<GoodsReceipt> {
        self.ledger.append_receipt(po_id, draft)
    }

    pub fn list_receipts(&self, po_id: OrderId) -> DomainResult<Vec<GoodsReceipt>> {
        self.ledger.list_receipts(po_id)
    }

    /// Ordered-vs-received reconciliation for one order.
    ///
    /// Pure projection over current state: available in every status, never
    /// persisted, recomputed per call.
    pub fn reconcile_order(&self, po_id: OrderId) -> DomainResult<ReconciliationSummary> {
        let order = self.ledger.get_order(po_id)?;
        let receipts = self.ledger.list_receipts(po_id)?;
        Ok(reconcile(&order, &receipts))
    }
}
