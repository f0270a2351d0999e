// src/extract/mod.rs
// Pattern-based fact extraction from free text and downstream records

mod connectors;
mod order_id;
mod order_status;

pub use connectors::{MAX_CONNECTORS, extract_connector_types};
pub use order_id::extract_order_id;
pub use order_status::{OrderLine, OrderStatus, ProcessedOrder, process_order_response, translate_order_status};
