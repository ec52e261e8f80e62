use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as a table. Worksheet amounts are grouped with thousands
/// separators; ratios keep four decimal places. Display formatting lives
/// here, never in the engine.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_figures(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    print_figures(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_figures(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Figure", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_figure(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

pub(crate) fn format_figure(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => format_amount(f),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Amounts round to whole units with thousands grouping; fractions below
/// one (the export ratio) keep four decimal places.
fn format_amount(n: f64) -> String {
    if n != 0.0 && n.abs() < 1.0 {
        format!("{n:.4}")
    } else {
        group_thousands(n.round() as i64)
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}
