use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use procura_core::{DomainError, DomainResult, Entity, OrderId, ReceiptId};
use procura_orders::PurchaseOrder;

/// One received-quantity entry, referencing an order line by its stable
/// 0-based index. Index-based referencing is safe because order lines are
/// frozen at creation; if lines ever become editable, switch to per-line ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub line_index: u32,
    pub received_quantity: Decimal,
    pub remarks: Option<String>,
}

/// Caller input for a receipt item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItemDraft {
    pub line_index: u32,
    pub received_quantity: Decimal,
    pub remarks: Option<String>,
}

/// Caller input for receipt creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptDraft {
    pub grn_date: NaiveDate,
    pub items: Vec<ReceiptItemDraft>,
    pub notes: Option<String>,
}

/// Goods receipt note: a record of goods physically received against a
/// purchase order, possibly partial. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsReceipt {
    id: ReceiptId,
    grn_number: String,
    po_id: OrderId,
    grn_date: NaiveDate,
    items: Vec<ReceiptItem>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl GoodsReceipt {
    /// Assemble a receipt from an already-validated draft.
    ///
    /// Callers must have run [`validate_items`] and [`check_over_receipt`]
    /// against the parent order first; the store does both under its write
    /// lock before persisting.
    pub fn new(
        id: ReceiptId,
        grn_number: String,
        po_id: OrderId,
        draft: ReceiptDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            grn_number,
            po_id,
            grn_date: draft.grn_date,
            items: draft
                .items
                .into_iter()
                .map(|i| ReceiptItem {
                    line_index: i.line_index,
                    received_quantity: i.received_quantity,
                    remarks: i.remarks,
                })
                .collect(),
            notes: draft.notes,
            created_at,
        }
    }

    pub fn id_typed(&self) -> ReceiptId {
        self.id
    }

    pub fn grn_number(&self) -> &str {
        &self.grn_number
    }

    pub fn po_id(&self) -> OrderId {
        self.po_id
    }

    pub fn grn_date(&self) -> NaiveDate {
        self.grn_date
    }

    pub fn items(&self) -> &[ReceiptItem] {
        &self.items
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for GoodsReceipt {
    type Id = ReceiptId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validate receipt items against the parent order's line list.
///
/// Checks, in order: items non-empty, every `line_index` valid for the
/// order, every `received_quantity` strictly positive. All failures are
/// `Validation`.
pub fn validate_items(order: &PurchaseOrder, items: &[ReceiptItemDraft]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation(
            "goods receipt must have at least one item",
        ));
    }
    for item in items {
        if order.line(item.line_index).is_none() {
            return Err(DomainError::validation(format!(
                "line_index {} does not exist on order {}",
                item.line_index,
                order.po_number()
            )));
        }
    }
    for item in items {
        if item.received_quantity <= Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "line_index {}: received_quantity must be positive (got {})",
                item.line_index, item.received_quantity
            )));
        }
    }
    Ok(())
}

/// Cumulative received quantity per line index across a set of receipts.
pub fn received_by_line(receipts: &[GoodsReceipt]) -> HashMap<u32, Decimal> {
    let mut totals: HashMap<u32, Decimal> = HashMap::new();
    for receipt in receipts {
        for item in receipt.items() {
            *totals.entry(item.line_index).or_insert(Decimal::ZERO) += item.received_quantity;
        }
    }
    totals
}

/// Enforce the over-receipt invariant: for each referenced line,
/// already-received + newly-received must not exceed the ordered quantity.
///
/// The offending receipt fails with `OverReceipt` and must not be persisted.
pub fn check_over_receipt(
    order: &PurchaseOrder,
    existing: &[GoodsReceipt],
    items: &[ReceiptItemDraft],
) -> DomainResult<()> {
    let already = received_by_line(existing);

    // A single draft may reference the same line more than once; accumulate
    // before comparing so the check covers the draft as a whole.
    let mut incoming: HashMap<u32, Decimal> = HashMap::new();
    for item in items {
        *incoming.entry(item.line_index).or_insert(Decimal::ZERO) += item.received_quantity;
    }

    for (line_index, quantity) in incoming {
        let Some(line) = order.line(line_index) else {
            return Err(DomainError::validation(format!(
                "line_index {} does not exist on order {}",
                line_index,
                order.po_number()
            )));
        };
        let prior = already.get(&line_index).copied().unwrap_or(Decimal::ZERO);
        if prior + quantity > line.quantity {
            return Err(DomainError::over_receipt(format!(
                "line {}: received {} + incoming {} would exceed ordered {}",
                line_index, prior, quantity, line.quantity
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use procura_core::{ProjectId, VendorId};
    use procura_orders::{LineDraft, OrderDraft};
    use rust_decimal_macros::dec;

    fn order_with_quantities(quantities: &[Decimal]) -> PurchaseOrder {
        let lines = quantities
            .iter()
            .map(|q| LineDraft {
                description: "steel rods".to_string(),
                unit: "kg".to_string(),
                quantity: *q,
                rate: dec!(50),
                gst_rate: None,
            })
            .collect();
        PurchaseOrder::create(
            OrderId::new(),
            "PO-2026-0001".to_string(),
            OrderDraft {
                vendor_id: VendorId::new(),
                project_id: ProjectId::new(),
                po_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                delivery_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                lines,
                terms: None,
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn item(line_index: u32, quantity: Decimal) -> ReceiptItemDraft {
        ReceiptItemDraft {
            line_index,
            received_quantity: quantity,
            remarks: None,
        }
    }

    fn receipt(po_id: OrderId, items: Vec<ReceiptItemDraft>) -> GoodsReceipt {
        GoodsReceipt::new(
            ReceiptId::new(),
            "GRN-2026-0001".to_string(),
            po_id,
            ReceiptDraft {
                grn_date: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
                items,
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn empty_items_are_rejected() {
        let order = order_with_quantities(&[dec!(10)]);
        let err = validate_items(&order, &[]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn unknown_line_index_is_rejected() {
        let order = order_with_quantities(&[dec!(10)]);
        let err = validate_items(&order, &[item(3, dec!(1))]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn non_positive_received_quantity_is_rejected() {
        let order = order_with_quantities(&[dec!(10)]);
        let err = validate_items(&order, &[item(0, dec!(0))]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn receipt_up_to_ordered_quantity_passes() {
        let order = order_with_quantities(&[dec!(10)]);
        let existing = vec![receipt(order.id_typed(), vec![item(0, dec!(6))])];
        check_over_receipt(&order, &existing, &[item(0, dec!(4))]).unwrap();
    }

    #[test]
    fn receipt_beyond_ordered_quantity_is_rejected() {
        let order = order_with_quantities(&[dec!(10)]);
        let existing = vec![receipt(order.id_typed(), vec![item(0, dec!(6))])];
        let err = check_over_receipt(&order, &existing, &[item(0, dec!(5))]).unwrap_err();
        assert!(matches!(err, DomainError::OverReceipt(_)));
    }

    #[test]
    fn duplicate_line_references_within_one_draft_accumulate() {
        let order = order_with_quantities(&[dec!(10)]);
        let err =
            check_over_receipt(&order, &[], &[item(0, dec!(6)), item(0, dec!(5))]).unwrap_err();
        assert!(matches!(err, DomainError::OverReceipt(_)));
    }

    #[test]
    fn received_by_line_sums_across_receipts() {
        let order = order_with_quantities(&[dec!(10), dec!(20)]);
        let receipts = vec![
            receipt(order.id_typed(), vec![item(0, dec!(4)), item(1, dec!(20))]),
            receipt(order.id_typed(), vec![item(0, dec!(3))]),
        ];
        let totals = received_by_line(&receipts);
        assert_eq!(totals.get(&0).copied(), Some(dec!(7)));
        assert_eq!(totals.get(&1).copied(), Some(dec!(20)));
    }
}
