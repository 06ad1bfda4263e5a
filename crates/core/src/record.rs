use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Store-assigned identity. Exists only after first successful persistence.
pub type RecordId = i64;

/// Field values keyed by schema field name. Always strings — the sheet is
/// the interchange surface and every cell is text; the store's validation
/// decides what parses.
pub type FieldValues = HashMap<String, String>;

/// A persisted entity: immutable identity plus the schema's field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub values: FieldValues,
}

impl Record {
    /// Field value by name; missing fields read as empty.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}
