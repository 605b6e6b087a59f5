use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use procura_core::{DomainError, DomainResult, Entity, OrderId, ProjectId, VendorId};

use crate::totals::{compute_totals, validate_line, OrderTotals, DEFAULT_GST_RATE};

/// Purchase order status lifecycle.
///
/// `Rejected` and `Closed` are terminal: no transition is defined out of
/// them, and terminal orders accept no further receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Closed,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Rejected | OrderStatus::Closed)
    }

    /// Apply a lifecycle action per the transition table:
    /// pending→approved, pending→rejected, approved→closed.
    ///
    /// Anything else fails with `InvalidTransition`, including every attempt
    /// out of a terminal state.
    pub fn transition(self, action: LifecycleAction) -> DomainResult<OrderStatus> {
        match (self, action) {
            (OrderStatus::Pending, LifecycleAction::Approve) => Ok(OrderStatus::Approved),
            (OrderStatus::Pending, LifecycleAction::Reject) => Ok(OrderStatus::Rejected),
            (OrderStatus::Approved, LifecycleAction::Close) => Ok(OrderStatus::Closed),
            (from, action) => Err(DomainError::invalid_transition(format!(
                "cannot {action} a {from} purchase order"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Closed => "closed",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status-changing operations exposed by the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Approve,
    Reject,
    Close,
}

impl core::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            LifecycleAction::Approve => "approve",
            LifecycleAction::Reject => "reject",
            LifecycleAction::Close => "close",
        })
    }
}

/// Caller-supplied line data; `gst_rate` defaults to 18% when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub gst_rate: Option<Decimal>,
}

/// One priced item/quantity/rate entry within a purchase order.
///
/// `index` is the line's 0-based position, stable for the order's lifetime
/// (lines are frozen at creation), so receipts can reference lines by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub index: u32,
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub gst_rate: Decimal,
}

impl OrderLine {
    pub fn from_draft(index: u32, draft: LineDraft) -> DomainResult<Self> {
        let line = OrderLine {
            index,
            description: draft.description,
            unit: draft.unit,
            quantity: draft.quantity,
            rate: draft.rate,
            gst_rate: draft.gst_rate.unwrap_or(DEFAULT_GST_RATE),
        };
        validate_line(&line)?;
        Ok(line)
    }

    /// Derived, full precision: `quantity * rate`.
    pub fn line_amount(&self) -> Decimal {
        self.quantity * self.rate
    }

    /// Derived, full precision: `line_amount * gst_rate / 100`.
    pub fn line_gst(&self) -> Decimal {
        self.line_amount() * self.gst_rate / Decimal::ONE_HUNDRED
    }
}

/// Caller input for order creation. Vendor/project resolution happens at the
/// service boundary; this draft carries the already-accepted references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub vendor_id: VendorId,
    pub project_id: ProjectId,
    pub po_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub lines: Vec<LineDraft>,
    pub terms: Option<String>,
}

/// Purchase order: immutable document data plus a mutable status flag.
///
/// Lines and totals are frozen at creation — no line may be added, removed,
/// or reordered afterwards. Amending contents after issuance should produce
/// a new order, not a silent edit. Only `status` mutates, through
/// [`PurchaseOrder::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    id: OrderId,
    po_number: String,
    vendor_id: VendorId,
    project_id: ProjectId,
    po_date: NaiveDate,
    delivery_date: NaiveDate,
    lines: Vec<OrderLine>,
    terms: Option<String>,
    status: OrderStatus,
    totals: OrderTotals,
    created_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Validate a draft and freeze it into a pending purchase order.
    ///
    /// Fails with `Validation` when the line list is empty or any line
    /// violates the quantity/rate/GST rules. Totals are computed here, once,
    /// and never independently editable.
    pub fn create(
        id: OrderId,
        po_number: String,
        draft: OrderDraft,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if draft.lines.is_empty() {
            return Err(DomainError::validation(
                "purchase order must have at least one line",
            ));
        }

        let lines = draft
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, l)| OrderLine::from_draft(i as u32, l))
            .collect::<DomainResult<Vec<_>>>()?;

        let totals = compute_totals(&lines)?;

        Ok(Self {
            id,
            po_number,
            vendor_id: draft.vendor_id,
            project_id: draft.project_id,
            po_date: draft.po_date,
            delivery_date: draft.delivery_date,
            lines,
            terms: draft.terms,
            status: OrderStatus::Pending,
            totals,
            created_at,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn po_number(&self) -> &str {
        &self.po_number
    }

    pub fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn po_date(&self) -> NaiveDate {
        self.po_date
    }

    pub fn delivery_date(&self) -> NaiveDate {
        self.delivery_date
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Look up a line by its stable index.
    pub fn line(&self, index: u32) -> Option<&OrderLine> {
        self.lines.get(index as usize)
    }

    pub fn terms(&self) -> Option<&str> {
        self.terms.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    pub fn subtotal(&self) -> Decimal {
        self.totals.subtotal
    }

    pub fn gst_amount(&self) -> Decimal {
        self.totals.gst_amount
    }

    pub fn total(&self) -> Decimal {
        self.totals.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Apply a lifecycle action, mutating `status` and nothing else.
    pub fn apply(&mut self, action: LifecycleAction) -> DomainResult<()> {
        self.status = self.status.transition(action)?;
        Ok(())
    }
}

impl Entity for PurchaseOrder {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
