// src/extract/order_status.rs
// Order status code translation and order record cleanup

use serde::Serialize;
use serde_json::Value;

/// Status codes reported by the order management API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Confirmed,
    PickingInProgress,
    PartlyDispatched,
    Dispatched,
    Received,
}

impl OrderStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Confirmed),
            1 => Some(Self::PickingInProgress),
            2 => Some(Self::PartlyDispatched),
            3 => Some(Self::Dispatched),
            10 => Some(Self::Received),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::PickingInProgress => "Picking in Progress",
            Self::PartlyDispatched => "Partly Dispatched",
            Self::Dispatched => "Dispatched",
            Self::Received => "Received",
        }
    }
}

/// Translate a raw status code into its label
pub fn translate_order_status(code: i64) -> String {
    match OrderStatus::from_code(code) {
        Some(status) => status.label().to_string(),
        None => format!("Unknown Status ({})", code),
    }
}

/// One line of an order as handed to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub item_id: Value,
    pub status: Value,
}

/// Order record with translated status, shaped for the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedOrder {
    pub order_id: Value,
    pub status: String,
    pub status_code: Value,
    pub order_date: Value,
    pub shipping_agent: Value,
    pub ship_to_address: Value,
    pub subtotal: Value,
    pub next_shipment: Value,
    pub order_lines: Vec<OrderLine>,
    pub total_items: usize,
}

fn field(data: &Value, key: &str) -> Value {
    data.get(key).cloned().unwrap_or(Value::Null)
}

/// Label for the raw `status` field. An absent field counts as code -1, an
/// explicit null is reported as `None`. Whole floats and booleans look up
/// the same entry as the matching integer.
fn status_label(status: Option<&Value>) -> String {
    let Some(value) = status else {
        return translate_order_status(-1);
    };

    let code = match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    };

    match (code.and_then(OrderStatus::from_code), value) {
        (Some(known), _) => known.label().to_string(),
        (None, Value::Null) => "Unknown Status (None)".to_string(),
        (None, Value::String(s)) => format!("Unknown Status ({})", s),
        (None, other) => format!("Unknown Status ({})", other),
    }
}

/// Map the raw camelCase order API record to a [`ProcessedOrder`].
///
/// Unknown or missing fields come through as JSON null.
pub fn process_order_response(data: &Value) -> ProcessedOrder {
    let status = status_label(data.get("status"));
    let status_code = field(data, "status");

    let order_lines: Vec<OrderLine> = data
        .get("orderLines")
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .map(|line| OrderLine {
                    item_id: field(line, "itemId"),
                    status: field(line, "status"),
                })
                .collect()
        })
        .unwrap_or_default();

    ProcessedOrder {
        order_id: field(data, "orderId"),
        status,
        status_code,
        order_date: field(data, "orderDate"),
        shipping_agent: field(data, "shippingAgentName"),
        ship_to_address: field(data, "shipToAddress"),
        subtotal: field(data, "subTotal"),
        next_shipment: field(data, "nextShipment"),
        total_items: order_lines.len(),
        order_lines,
    }
}
