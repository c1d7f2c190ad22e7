use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "monthly_emi",
        "outstanding_principal",
        "total_interest",
        "total_paid",
        "months_scheduled",
    ];

    if let Value::Object(map) = result_obj {
        // A prepayment result's answer lives inside the outcome variant
        if let Some(Value::Object(outcome)) = map.get("outcome") {
            if let Some(Value::Object(revised)) = outcome.get("Revised") {
                if let Some(emi) = revised.get("revised_emi") {
                    println!("{}", format_minimal(emi));
                    return;
                }
            }
            if outcome.contains_key("Discharged") {
                println!("discharged");
                return;
            }
        }

        // Try priority keys first (skip null values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to the first field
        if let Some((_, val)) = map.iter().next() {
            println!("{}", format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
