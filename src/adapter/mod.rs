use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ViewError;

pub const ORDER_KEY: &str = "Order";
pub const DELIVERY_KEY: &str = "Delivery";
pub const PAYMENT_KEY: &str = "Payment";
pub const ITEMS_KEY: &str = "Items";

/// Which response shape to expect from the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    /// Unwrap `Order` when it is present, otherwise treat the body as flat.
    #[default]
    Auto,
    /// `{Order, Delivery, Payment, Items}`.
    Combined,
    /// The order fields sit at the top level with inline sub-sections.
    Flat,
}

impl Envelope {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "combined" | "nested" => Some(Self::Combined),
            "flat" => Some(Self::Flat),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Envelope::Auto => "auto",
            Envelope::Combined => "combined",
            Envelope::Flat => "flat",
        }
    }
}

/// Reshape a raw response into one mapping of main fields plus optional
/// `Delivery`, `Payment` and `Items` entries. `raw` is left untouched.
pub fn adapt(raw: &Value, envelope: Envelope) -> Result<Map<String, Value>, ViewError> {
    let top = match raw {
        Value::Object(map) => map,
        _ => return Err(ViewError::MissingOrder),
    };

    let nested = top.get(ORDER_KEY).and_then(Value::as_object);
    match (envelope, nested) {
        (Envelope::Flat, _) | (Envelope::Auto, None) => Ok(top.clone()),
        (Envelope::Combined, None) => Err(ViewError::MissingOrder),
        (Envelope::Combined | Envelope::Auto, Some(order)) => Ok(flatten_combined(top, order)),
    }
}

fn flatten_combined(top: &Map<String, Value>, order: &Map<String, Value>) -> Map<String, Value> {
    let mut out = order.clone();
    for key in [DELIVERY_KEY, PAYMENT_KEY, ITEMS_KEY] {
        if let Some(section) = top.get(key) {
            out.insert(key.to_string(), section.clone());
        }
    }
    out
}
