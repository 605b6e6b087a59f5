use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use procura_core::{DomainResult, OrderId, ProjectId, ReceiptId, VendorId};
use procura_directory::CatalogItem;
use procura_orders::{LineDraft, OrderDraft, OrderLine, OrderStatus, PurchaseOrder};
use procura_receipts::{GoodsReceipt, ReceiptDraft, ReceiptItem, ReceiptItemDraft};
use procura_recon::{LineMatch, ReconciliationSummary};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub vendor_id: String,
    pub project_id: String,
    pub po_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub lines: Vec<OrderLineRequest>,
    #[serde(default)]
    pub terms: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub gst_rate: Option<Decimal>,
}

impl CreateOrderRequest {
    /// Parse id strings into typed ids; everything else passes through for
    /// domain-level validation.
    pub fn into_draft(self) -> DomainResult<OrderDraft> {
        let vendor_id: VendorId = self.vendor_id.parse()?;
        let project_id: ProjectId = self.project_id.parse()?;
        Ok(OrderDraft {
            vendor_id,
            project_id,
            po_date: self.po_date,
            delivery_date: self.delivery_date,
            lines: self
                .lines
                .into_iter()
                .map(|l| LineDraft {
                    description: l.description,
                    unit: l.unit,
                    quantity: l.quantity,
                    rate: l.rate,
                    gst_rate: l.gst_rate,
                })
                .collect(),
            terms: self.terms,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReceiptRequest {
    pub grn_date: NaiveDate,
    pub items: Vec<ReceiptItemRequest>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReceiptItemRequest {
    pub line_index: u32,
    pub received_quantity: Decimal,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl CreateReceiptRequest {
    pub fn into_draft(self) -> ReceiptDraft {
        ReceiptDraft {
            grn_date: self.grn_date,
            items: self
                .items
                .into_iter()
                .map(|i| ReceiptItemDraft {
                    line_index: i.line_index,
                    received_quantity: i.received_quantity,
                    remarks: i.remarks,
                })
                .collect(),
            notes: self.notes,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub po_number: String,
    pub vendor_id: VendorId,
    pub project_id: ProjectId,
    pub po_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub lines: Vec<OrderLine>,
    pub terms: Option<String>,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub gst_amount: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn from_order(order: &PurchaseOrder) -> Self {
        Self {
            id: order.id_typed(),
            po_number: order.po_number().to_string(),
            vendor_id: order.vendor_id(),
            project_id: order.project_id(),
            po_date: order.po_date(),
            delivery_date: order.delivery_date(),
            lines: order.lines().to_vec(),
            terms: order.terms().map(str::to_string),
            status: order.status(),
            subtotal: order.subtotal(),
            gst_amount: order.gst_amount(),
            total: order.total(),
            created_at: order.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub id: ReceiptId,
    pub grn_number: String,
    pub po_id: OrderId,
    pub grn_date: NaiveDate,
    pub items: Vec<ReceiptItem>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReceiptResponse {
    pub fn from_receipt(receipt: &GoodsReceipt) -> Self {
        Self {
            id: receipt.id_typed(),
            grn_number: receipt.grn_number().to_string(),
            po_id: receipt.po_id(),
            grn_date: receipt.grn_date(),
            items: receipt.items().to_vec(),
            notes: receipt.notes().map(str::to_string),
            created_at: receipt.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReconciliationResponse {
    pub po_number: String,
    pub status: OrderStatus,
    pub lines: Vec<LineMatch>,
    pub complete: bool,
    pub completion_percent: Decimal,
}

impl ReconciliationResponse {
    pub fn new(order: &PurchaseOrder, summary: ReconciliationSummary) -> Self {
        Self {
            po_number: order.po_number().to_string(),
            status: order.status(),
            lines: summary.lines,
            complete: summary.complete,
            completion_percent: summary.completion_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub project_id: ProjectId,
    pub project_name: String,
    pub items: Vec<CatalogItem>,
}
