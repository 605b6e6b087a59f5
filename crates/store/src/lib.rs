//! Storage layer: order/receipt store traits + in-memory ledger.
//!
//! The engine is stateless business logic over these traits; all concurrency
//! control is pushed down here. The in-memory implementation is suitable for
//! tests/dev and as the reference semantics for any persistent backend.

pub mod memory;
pub mod order_store;
pub mod receipt_store;

pub use memory::InMemoryLedger;
pub use order_store::OrderStore;
pub use receipt_store::ReceiptStore;
