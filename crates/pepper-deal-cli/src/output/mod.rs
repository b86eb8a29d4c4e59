pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Flatten nested objects into `parent.child` rows, in field order.
/// Scenario blocks in the profit report become `full_redemption.profit` etc.
pub(crate) fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into("", map, &mut rows);
    rows
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, rows),
            other => rows.push((name, other.clone())),
        }
    }
}

/// Render a scalar JSON value as plain text.
pub(crate) fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(plain).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_scenarios() {
        let value = json!({
            "cash_profit": "-73.385",
            "full_redemption": { "profit": "1.615", "roi": "0.323" },
        });
        let rows = flatten(value.as_object().unwrap());
        let names: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert!(names.contains(&"full_redemption.profit"));
        assert!(names.contains(&"full_redemption.roi"));
        assert!(names.contains(&"cash_profit"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_plain_joins_arrays() {
        assert_eq!(plain(&json!(["2024-07-04", "2024-12-25"])), "2024-07-04, 2024-12-25");
        assert_eq!(plain(&Value::Null), "");
    }
}
