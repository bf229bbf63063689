//! Inventory snapshot model.
//!
//! Read-side records as the inventory data layer hands them over: warehouses,
//! products with their per-warehouse stock distribution, and the transfer
//! history. Everything here is deterministic (no IO, no storage).

pub mod stock;
pub mod transfer;

pub use stock::{Product, ProductId, StockLevel, Warehouse, WarehouseId};
pub use transfer::{TransferDraft, TransferLine, TransferRecord, TransferStats, TransferStatus};
