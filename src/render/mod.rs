//! Order rendering.
//!
//! [`table`] turns JSON into table descriptors without producing any text;
//! [`markup`] serializes descriptors. The `render_*` functions here chain
//! the two for callers that only want the markup string.

pub mod dates;
pub mod markup;
pub mod table;

use serde_json::{Map, Value};

use crate::messages;

pub use table::{Cell, GridTable, KeyValueTable, ListBlock, OrderView};

/// Two-column key/value table, optionally captioned.
pub fn render_object(map: &Map<String, Value>, title: Option<&str>) -> String {
    markup::key_value_table(&table::object_table(map, title))
}

/// Header+rows table, or the empty placeholder for an empty sequence.
pub fn render_array(items: &[Value]) -> String {
    markup::list_block(&table::list_block(items, None))
}

/// The whole order: main table, then delivery, payment and items.
pub fn render_order(order: Option<&Map<String, Value>>) -> String {
    match order {
        Some(order) => markup::order_view(&table::order_view(order)),
        None => markup::paragraph(messages::NO_ORDER_DATA),
    }
}
