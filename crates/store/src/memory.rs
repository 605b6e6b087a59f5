use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{Datelike, Utc};

use procura_core::{DomainError, DomainResult, OrderId, ReceiptId};
use procura_orders::{LifecycleAction, OrderDraft, OrderStatus, PurchaseOrder};
use procura_receipts::{check_over_receipt, validate_items, GoodsReceipt, ReceiptDraft};

use crate::order_store::OrderStore;
use crate::receipt_store::ReceiptStore;

#[derive(Debug, Default)]
struct LedgerState {
    orders: HashMap<OrderId, PurchaseOrder>,
    receipts: HashMap<OrderId, Vec<GoodsReceipt>>,
    po_sequence: HashMap<i32, u32>,
    grn_sequence: HashMap<i32, u32>,
}

/// In-memory procurement ledger.
///
/// Orders, receipts, and number sequences live under a single lock; status
/// transitions and receipt appends hold the write lock for their full
/// read-validate-write span, which gives them the atomicity a persistent
/// backend would get from row locks or a serializable transaction. Reads
/// take the read lock and run with unlimited concurrency.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> DomainError {
        DomainError::conflict("ledger lock poisoned")
    }
}

impl OrderStore for InMemoryLedger {
    fn create_order(&self, draft: OrderDraft) -> DomainResult<PurchaseOrder> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;

        let now = Utc::now();
        let year = now.year();
        let next = state.po_sequence.get(&year).copied().unwrap_or(0) + 1;
        let po_number = format!("PO-{year}-{next:04}");

        // Validate (and compute totals) before committing the sequence, so a
        // rejected draft leaves no numbering gap.
        let order = PurchaseOrder::create(OrderId::new(), po_number, draft, now)?;

        state.po_sequence.insert(year, next);
        state.orders.insert(order.id_typed(), order.clone());

        tracing::info!(order_id = %order.id_typed(), po_number = order.po_number(), "purchase order created");
        Ok(order)
    }

    fn get_order(&self, id: OrderId) -> DomainResult<PurchaseOrder> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        state
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("purchase order {id}")))
    }

    fn list_orders(&self) -> DomainResult<Vec<PurchaseOrder>> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        let mut orders: Vec<PurchaseOrder> = state.orders.values().cloned().collect();
        orders.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.po_number().cmp(b.po_number()))
        });
        Ok(orders)
    }

    fn transition_order(
        &self,
        id: OrderId,
        action: LifecycleAction,
    ) -> DomainResult<PurchaseOrder> {
        // Write lock for the whole read-validate-write span: of two
        // concurrent conflicting transitions, exactly one sees the prior
        // status and wins.
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        let order = state
            .orders
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("purchase order {id}")))?;

        order.apply(action)?;
        tracing::info!(order_id = %id, status = %order.status(), "purchase order transitioned");
        Ok(order.clone())
    }

    fn delete_order(&self, id: OrderId) -> DomainResult<()> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        let order = state
            .orders
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("purchase order {id}")))?;

        if order.status() == OrderStatus::Closed {
            return Err(DomainError::invalid_state(
                "closed purchase orders are permanent records and cannot be deleted",
            ));
        }

        state.orders.remove(&id);
        // Receipts have no independent value once their parent is gone.
        let cascaded = state.receipts.remove(&id).map(|r| r.len()).unwrap_or(0);
        tracing::info!(order_id = %id, cascaded_receipts = cascaded, "purchase order deleted");
        Ok(())
    }
}

impl ReceiptStore for InMemoryLedger {
    fn append_receipt(&self, po_id: OrderId, draft: ReceiptDraft) -> DomainResult<GoodsReceipt> {
        // Write lock across check-and-append: two concurrent partial
        // receipts cannot both pass the over-receipt check.
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        let state = &mut *state;

        let order = state
            .orders
            .get(&po_id)
            .ok_or_else(|| DomainError::not_found(format!("purchase order {po_id}")))?;

        if order.status() != OrderStatus::Approved {
            return Err(DomainError::invalid_state(format!(
                "goods receipt requires an approved order (order {} is {})",
                order.po_number(),
                order.status()
            )));
        }

        validate_items(order, &draft.items)?;

        let existing = state
            .receipts
            .get(&po_id)
            .map(|r| r.as_slice())
            .unwrap_or(&[]);
        check_over_receipt(order, existing, &draft.items)?;

        let now = Utc::now();
        let year = now.year();
        let next = state.grn_sequence.get(&year).copied().unwrap_or(0) + 1;
        state.grn_sequence.insert(year, next);
        let grn_number = format!("GRN-{year}-{next:04}");

        let receipt = GoodsReceipt::new(ReceiptId::new(), grn_number, po_id, draft, now);
        state.receipts.entry(po_id).or_default().push(receipt.clone());

        tracing::info!(order_id = %po_id, grn_number = receipt.grn_number(), "goods receipt recorded");
        Ok(receipt)
    }

    fn list_receipts(&self, po_id: OrderId) -> DomainResult<Vec<GoodsReceipt>> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        if !state.orders.contains_key(&po_id) {
            return Err(DomainError::not_found(format!("purchase order {po_id}")));
        }
        // Receipts are appended in creation order; the vec is already the
        // delivery history, ascending.
        Ok(state.receipts.get(&po_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use procura_core::{ProjectId, VendorId};
    use procura_orders::LineDraft;
    use procura_receipts::ReceiptItemDraft;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn draft(quantities: &[Decimal]) -> OrderDraft {
        OrderDraft {
            vendor_id: VendorId::new(),
            project_id: ProjectId::new(),
            po_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            delivery_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            lines: quantities
                .iter()
                .map(|q| LineDraft {
                    description: "bricks".to_string(),
                    unit: "pcs".to_string(),
                    quantity: *q,
                    rate: dec!(8),
                    gst_rate: None,
                })
                .collect(),
            terms: None,
        }
    }

    fn receipt_draft(items: Vec<(u32, Decimal)>) -> ReceiptDraft {
        ReceiptDraft {
            grn_date: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
            items: items
                .into_iter()
                .map(|(line_index, received_quantity)| ReceiptItemDraft {
                    line_index,
                    received_quantity,
                    remarks: None,
                })
                .collect(),
            notes: None,
        }
    }

    #[test]
    fn po_numbers_are_sequential_within_a_year() {
        let ledger = InMemoryLedger::new();
        let first = ledger.create_order(draft(&[dec!(1)])).unwrap();
        let second = ledger.create_order(draft(&[dec!(1)])).unwrap();

        let year = Utc::now().year();
        assert_eq!(first.po_number(), format!("PO-{year}-0001"));
        assert_eq!(second.po_number(), format!("PO-{year}-0002"));
    }

    #[test]
    fn rejected_draft_leaves_no_numbering_gap() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.create_order(draft(&[])).is_err());
        let order = ledger.create_order(draft(&[dec!(1)])).unwrap();
        assert!(order.po_number().ends_with("-0001"));
    }

    #[test]
    fn get_unknown_order_is_not_found() {
        let ledger = InMemoryLedger::new();
        let err = ledger.get_order(OrderId::new()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn concurrent_conflicting_transitions_have_one_winner() {
        let ledger = Arc::new(InMemoryLedger::new());
        let order = ledger.create_order(draft(&[dec!(1)])).unwrap();
        let id = order.id_typed();

        let approve = {
            let ledger = ledger.clone();
            std::thread::spawn(move || ledger.transition_order(id, LifecycleAction::Approve))
        };
        let reject = {
            let ledger = ledger.clone();
            std::thread::spawn(move || ledger.transition_order(id, LifecycleAction::Reject))
        };

        let results = [approve.join().unwrap(), reject.join().unwrap()];
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, DomainError::InvalidTransition(_))));
    }

    #[test]
    fn receipt_against_pending_order_is_rejected_and_not_persisted() {
        let ledger = InMemoryLedger::new();
        let order = ledger.create_order(draft(&[dec!(10)])).unwrap();

        let err = ledger
            .append_receipt(order.id_typed(), receipt_draft(vec![(0, dec!(5))]))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert!(ledger.list_receipts(order.id_typed()).unwrap().is_empty());
    }

    #[test]
    fn over_receipt_is_rejected_and_not_persisted() {
        let ledger = InMemoryLedger::new();
        let order = ledger.create_order(draft(&[dec!(10)])).unwrap();
        let id = order.id_typed();
        ledger.transition_order(id, LifecycleAction::Approve).unwrap();

        ledger.append_receipt(id, receipt_draft(vec![(0, dec!(6))])).unwrap();
        ledger.append_receipt(id, receipt_draft(vec![(0, dec!(4))])).unwrap();

        let err = ledger
            .append_receipt(id, receipt_draft(vec![(0, dec!(1))]))
            .unwrap_err();
        assert!(matches!(err, DomainError::OverReceipt(_)));
        assert_eq!(ledger.list_receipts(id).unwrap().len(), 2);
    }

    #[test]
    fn receipts_list_in_creation_order() {
        let ledger = InMemoryLedger::new();
        let order = ledger.create_order(draft(&[dec!(10)])).unwrap();
        let id = order.id_typed();
        ledger.transition_order(id, LifecycleAction::Approve).unwrap();

        let first = ledger.append_receipt(id, receipt_draft(vec![(0, dec!(2))])).unwrap();
        let second = ledger.append_receipt(id, receipt_draft(vec![(0, dec!(3))])).unwrap();

        let listed = ledger.list_receipts(id).unwrap();
        assert_eq!(listed[0].grn_number(), first.grn_number());
        assert_eq!(listed[1].grn_number(), second.grn_number());
    }

    #[test]
    fn delete_cascades_receipts() {
        let ledger = InMemoryLedger::new();
        let order = ledger.create_order(draft(&[dec!(10)])).unwrap();
        let id = order.id_typed();
        ledger.transition_order(id, LifecycleAction::Approve).unwrap();
        ledger.append_receipt(id, receipt_draft(vec![(0, dec!(4))])).unwrap();

        ledger.delete_order(id).unwrap();
        assert!(matches!(
            ledger.get_order(id).unwrap_err(),
            DomainError::NotFound(_)
        ));
        assert!(matches!(
            ledger.list_receipts(id).unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[test]
    fn delete_closed_order_is_rejected() {
        let ledger = InMemoryLedger::new();
        let order = ledger.create_order(draft(&[dec!(10)])).unwrap();
        let id = order.id_typed();
        ledger.transition_order(id, LifecycleAction::Approve).unwrap();
        ledger.transition_order(id, LifecycleAction::Close).unwrap();

        let err = ledger.delete_order(id).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        // Still there.
        assert!(ledger.get_order(id).is_ok());
    }

    #[test]
    fn list_orders_follows_creation_order() {
        let ledger = InMemoryLedger::new();
        let a = ledger.create_order(draft(&[dec!(1)])).unwrap();
        let b = ledger.create_order(draft(&[dec!(1)])).unwrap();

        let listed = ledger.list_orders().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].po_number(), a.po_number());
        assert_eq!(listed[1].po_number(), b.po_number());
    }
}
