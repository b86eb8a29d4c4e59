use serde_json::Value;

use super::plain;

/// Key answer per command, tried in order. Dotted names reach into nested
/// objects.
const PRIORITY_KEYS: [&str; 5] = [
    "expected_redemption.roi",
    "deposit_date",
    "bonus",
    "historical_max_regular_rate",
    "cash_profit",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = lookup(result_obj, key) {
                if !val.is_null() {
                    println!("{}", plain(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, plain(val));
            return;
        }
    }

    println!("{}", plain(result_obj));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, part| v.get(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_dotted_path() {
        let v = json!({ "expected_redemption": { "roi": "-0.952" } });
        assert_eq!(lookup(&v, "expected_redemption.roi"), Some(&json!("-0.952")));
        assert_eq!(lookup(&v, "expected_redemption.missing"), None);
        assert_eq!(lookup(&v, "deposit_date"), None);
    }
}
