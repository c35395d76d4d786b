use crate::domain::model::{
    AssessorAttributes, InputRecord, OutputRecord, OutputSchema, OWNER, PARCEL_NUMBER,
};
use serde_json::Value;

/// Builds one flat output row: the input columns followed by the assessor
/// columns, both in schema order. Assessor keys the service left out become
/// empty strings so every row is exactly `schema.width()` wide.
pub fn merge_row(
    schema: &OutputSchema,
    input: &InputRecord,
    attributes: &AssessorAttributes,
) -> OutputRecord {
    let mut values = Vec::with_capacity(schema.width());

    for column in schema.input_fields() {
        let raw = input.get(column).unwrap_or_default();
        let raw = match *column {
            PARCEL_NUMBER | OWNER => raw.trim(),
            _ => raw,
        };
        values.push(clean_value(raw));
    }

    for key in schema.assessor_fields() {
        let text = attributes.get(key).map(render_scalar).unwrap_or_default();
        values.push(clean_value(&text));
    }

    OutputRecord { values }
}

/// Text form of an attribute value as it appears in the output file.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keeps a value inside its column: commas are dropped and line breaks
/// become spaces, since the output is written without quoting.
pub fn clean_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ',')
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}
