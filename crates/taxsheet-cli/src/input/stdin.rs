use serde_json::{Map, Value};
use std::io::{self, Read};

/// Attempt to read a JSON cell map from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
pub fn read_stdin() -> Result<Option<Map<String, Value>>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed)?;
    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err("Piped scenario must be a JSON object of cell ids to values".into()),
    }
}
