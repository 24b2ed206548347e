use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime};
use serde_json::Value;

const DISPLAY_FORMAT: &str = "%-d %B %Y г., %H:%M:%S";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Fields are treated as dates purely by name.
pub fn is_date_key(key: &str) -> bool {
    key.to_lowercase().contains("date")
}

/// Formatted replacement for `value` when `key` names a date and the value
/// parses as one. `None` means show the raw value.
pub fn localize(key: &str, value: &Value) -> Option<String> {
    if !is_date_key(key) || is_falsy(value) {
        return None;
    }
    parse_date_value(value).map(format_date)
}

pub fn format_date(dt: DateTime<FixedOffset>) -> String {
    dt.format_localized(DISPLAY_FORMAT, Locale::ru_RU).to_string()
}

/// Strings in the common wire formats, or numbers as epoch milliseconds.
pub fn parse_date_value(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let f = n.as_f64()?;
                    if !f.is_finite() {
                        return None;
                    }
                    f.trunc() as i64
                }
            };
            DateTime::from_timestamp_millis(millis).map(|dt| dt.fixed_offset())
        }
        _ => None,
    }
}

pub fn parse_date_str(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

// Empty strings, zero and false are never parsed.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn date_keys_match_case_insensitively() {
        assert!(is_date_key("dateCreated"));
        assert!(is_date_key("DeliveryDate"));
        assert!(is_date_key("UPDATE_TS"));
        assert!(!is_date_key("paymentDT"));
    }

    #[test]
    fn rfc3339_keeps_its_offset() {
        let out = localize("dateCreated", &json!("2021-11-26T06:22:19+03:00")).unwrap();
        assert!(out.starts_with("26 "));
        assert!(out.ends_with("2021 г., 06:22:19"));
    }

    #[test]
    fn utc_suffix_is_supported() {
        let out = localize("date_created", &json!("2021-11-26T06:22:19Z")).unwrap();
        assert!(out.ends_with("2021 г., 06:22:19"));
    }

    #[test]
    fn naive_and_date_only_values_are_utc() {
        let out = localize("date", &json!("2024-02-29 23:05:00")).unwrap();
        assert!(out.starts_with("29 "));
        assert!(out.ends_with("2024 г., 23:05:00"));

        let out = localize("shipDate", &json!("2024-03-01")).unwrap();
        assert!(out.ends_with("2024 г., 00:00:00"));
    }

    #[test]
    fn minutes_without_seconds_are_accepted() {
        let out = localize("deliveryDate", &json!("2024-03-01T10:15")).unwrap();
        assert!(out.starts_with("1 "));
        assert!(out.ends_with("2024 г., 10:15:00"));

        let out = localize("deliveryDate", &json!("2024-03-01 10:15")).unwrap();
        assert!(out.ends_with("2024 г., 10:15:00"));
    }

    #[test]
    fn numbers_are_epoch_millis() {
        let out = localize("date", &json!(1_637_907_739_000_i64)).unwrap();
        assert!(out.ends_with("2021 г., 06:22:19"));
    }

    #[test]
    fn invalid_values_are_left_alone() {
        assert_eq!(localize("dateCreated", &json!("not a date")), None);
        assert_eq!(localize("dateCreated", &json!("2021-13-45")), None);
        assert_eq!(localize("dateCreated", &json!({"y": 2021})), None);
        assert_eq!(localize("dateCreated", &json!(true)), None);
    }

    #[test]
    fn falsy_values_are_not_parsed() {
        assert_eq!(localize("dateCreated", &json!(0)), None);
        assert_eq!(localize("dateCreated", &json!("")), None);
        assert_eq!(localize("dateCreated", &json!(null)), None);
    }

    #[test]
    fn non_date_keys_are_never_formatted() {
        assert_eq!(localize("created", &json!("2021-11-26T06:22:19Z")), None);
    }
}
