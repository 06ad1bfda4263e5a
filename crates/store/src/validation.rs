//! Store-side field rules.
//!
//! Validation failures are not transport errors: they come back as
//! human-readable messages that the import pass joins into the row's error
//! cell, and the pass keeps going.

use sheetmirror_core::record::FieldValues;
use sheetmirror_core::schema::{FieldKind, Schema};

/// Check `values` against the schema. An empty vec means valid.
pub fn validate(schema: &Schema, values: &FieldValues) -> Vec<String> {
    let mut errors = Vec::new();

    for field in &schema.fields {
        let raw = values.get(&field.name).map(String::as_str).unwrap_or("");
        let raw = raw.trim();

        if raw.is_empty() {
            if field.required {
                errors.push(format!("{} can't be blank", field.name));
            }
            continue;
        }

        match field.kind {
            FieldKind::Text => {}
            FieldKind::Integer => {
                if raw.parse::<i64>().is_err() {
                    errors.push(format!("{} must be a whole number", field.name));
                }
            }
            FieldKind::Decimal => {
                if raw.parse::<f64>().is_err() {
                    errors.push(format!("{} must be a number", field.name));
                }
            }
        }
    }

    errors
}
