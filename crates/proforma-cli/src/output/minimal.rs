use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known proforma result fields in order of
/// priority (searching one level of nesting, since the return summary and
/// sale proceeds are nested objects), then fall back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "levered_irr",
        "equity_multiple",
        "after_tax_proceeds",
        "loan_amount",
        "noi",
        "sale_price",
        "annual_debt_service",
        "valid",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(found) = find_key(map, key) {
                if !found.is_null() {
                    println!("{}", format_minimal(found));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

/// Look for a key at the top level, then one level down.
fn find_key<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(val) = map.get(key) {
        return Some(val);
    }
    for val in map.values() {
        if let Value::Object(nested) = val {
            if let Some(found) = nested.get(key) {
                return Some(found);
            }
        }
    }
    None
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
