use serde_json::{Map, Value};

use super::dates;
use crate::adapter::{DELIVERY_KEY, ITEMS_KEY, PAYMENT_KEY};
use crate::messages;

const HEADING_KEYS: [&str; 4] = ["id", "orderUID", "order_uid", "OrderUID"];

/// A two-column table: one row per key.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValueTable {
    pub caption: Option<String>,
    pub rows: Vec<(String, Cell)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Table(KeyValueTable),
    List(ListBlock),
}

/// What a sequence turns into.
#[derive(Clone, Debug, PartialEq)]
pub enum ListBlock {
    Empty,
    Grid(GridTable),
}

/// Header row plus one row per element. `headers` is empty when the
/// first element is not a mapping; rows then hold a single cell.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTable {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderView {
    pub heading: Option<String>,
    pub main: KeyValueTable,
    pub delivery: Option<KeyValueTable>,
    pub payment: Option<KeyValueTable>,
    pub items: Option<ListBlock>,
}

pub fn object_table(map: &Map<String, Value>, title: Option<&str>) -> KeyValueTable {
    let rows = map
        .iter()
        .map(|(key, value)| (key.clone(), value_cell(key, value)))
        .collect();
    KeyValueTable {
        caption: title.filter(|t| !t.is_empty()).map(str::to_string),
        rows,
    }
}

fn value_cell(key: &str, value: &Value) -> Cell {
    match value {
        Value::Object(map) => Cell::Table(object_table(map, None)),
        Value::Array(items) => Cell::List(list_block(items, None)),
        _ => Cell::Text(dates::localize(key, value).unwrap_or_else(|| display_scalar(value))),
    }
}

pub fn list_block(items: &[Value], title: Option<&str>) -> ListBlock {
    let first = match items.first() {
        Some(first) => first,
        None => return ListBlock::Empty,
    };

    let caption = title.filter(|t| !t.is_empty()).map(str::to_string);
    let headers: Vec<String> = match first {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };

    let rows = items
        .iter()
        .map(|item| {
            if headers.is_empty() {
                return vec![grid_cell("", Some(item))];
            }
            headers
                .iter()
                .map(|h| grid_cell(h, item.as_object().and_then(|m| m.get(h))))
                .collect()
        })
        .collect();

    ListBlock::Grid(GridTable {
        caption,
        headers,
        rows,
    })
}

fn grid_cell(header: &str, value: Option<&Value>) -> String {
    match value {
        None => messages::MISSING_VALUE.to_string(),
        Some(v @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
        }
        Some(v) => dates::localize(header, v).unwrap_or_else(|| display_scalar(v)),
    }
}

/// Split an adapted order into its main fields and the three known
/// sub-sections. A section key is only taken out when its value has the
/// expected shape (or is null); anything else stays in the main table.
pub fn order_view(order: &Map<String, Value>) -> OrderView {
    let delivery_key = section_key(order, DELIVERY_KEY, Value::is_object);
    let payment_key = section_key(order, PAYMENT_KEY, Value::is_object);
    let items_key = section_key(order, ITEMS_KEY, Value::is_array);

    let taken = [delivery_key, payment_key, items_key];
    let main: Map<String, Value> = order
        .iter()
        .filter(|(k, _)| !taken.iter().flatten().any(|t| *t == k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let section = |key: Option<&str>| key.and_then(|k| order.get(k)).and_then(Value::as_object);

    let delivery = section(delivery_key).map(|m| object_table(m, Some("delivery")));
    let payment = section(payment_key).map(|m| object_table(m, Some("payment")));
    let items = items_key
        .and_then(|k| order.get(k))
        .and_then(Value::as_array)
        .map(|items| list_block(items, Some("items")));

    OrderView {
        heading: heading(&main),
        main: object_table(&main, Some(messages::MAIN_SECTION_TITLE)),
        delivery,
        payment,
        items,
    }
}

fn section_key<'a>(
    order: &'a Map<String, Value>,
    canonical: &'static str,
    shape: fn(&Value) -> bool,
) -> Option<&'a str> {
    let lower = canonical.to_lowercase();
    let found = [canonical, lower.as_str()]
        .into_iter()
        .find_map(|name| {
            order
                .get_key_value(name)
                .filter(|(_, v)| v.is_null() || shape(v))
        })
        .map(|(k, _)| k.as_str());
    found
}

fn heading(main: &Map<String, Value>) -> Option<String> {
    HEADING_KEYS
        .iter()
        .find_map(|k| main.get(*k))
        .filter(|v| !v.is_null() && !v.is_object() && !v.is_array())
        .map(|v| messages::order_heading(&display_scalar(v)))
}

/// Scalars as they read in JSON, without quotes around strings.
pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}
