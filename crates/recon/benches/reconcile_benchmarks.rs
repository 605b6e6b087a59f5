use chrono::{NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use procura_core::{OrderId, ProjectId, ReceiptId, VendorId};
use procura_orders::{LineDraft, OrderDraft, PurchaseOrder};
use procura_receipts::{GoodsReceipt, ReceiptDraft, ReceiptItemDraft};
use procura_recon::reconcile;

fn build_order(line_count: u32) -> PurchaseOrder {
    let lines = (0..line_count)
        .map(|i| LineDraft {
            description: format!("item {i}"),
            unit: "pcs".to_string(),
            quantity: Decimal::from(100),
            rate: Decimal::from(10),
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
    .expect("valid order")
}

fn build_receipts(order: &PurchaseOrder, receipt_count: u32) -> Vec<GoodsReceipt> {
    (0..receipt_count)
        .map(|n| {
            GoodsReceipt::new(
                ReceiptId::new(),
                format!("GRN-2026-{n:04}"),
                order.id_typed(),
                ReceiptDraft {
                    grn_date: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
                    items: order
                        .lines()
                        .iter()
                        .map(|l| ReceiptItemDraft {
                            line_index: l.index,
                            received_quantity: Decimal::ONE,
                            remarks: None,
                        })
                        .collect(),
                    notes: None,
                },
                Utc::now(),
            )
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let order = build_order(50);
    let receipts = build_receipts(&order, 40);

    c.bench_function("reconcile_50_lines_40_receipts", |b| {
        b.iter(|| reconcile(black_box(&order), black_box(&receipts)))
    });
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
