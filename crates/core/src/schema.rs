use serde::{Deserialize, Serialize};

/// Names that collide with the grid's fixed columns or the store's own
/// bookkeeping columns.
const RESERVED_NAMES: &[&str] = &["id", "errors", "created_at", "updated_at"];

// ---------------------------------------------------------------------------
// Field definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
}

impl Default for FieldKind {
    fn default() -> Self {
        Self::Text
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Decimal => write!(f, "decimal"),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Ordered field list shared by the store (table columns, validation) and
/// the grid layout (data columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Check the invariants the store and layout rely on. Returns the first
    /// violation as a message; callers wrap it in their own error type.
    pub fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("schema requires at least one field".into());
        }

        for (i, field) in self.fields.iter().enumerate() {
            if !is_identifier(&field.name) {
                return Err(format!(
                    "invalid field name '{}': lowercase identifiers only",
                    field.name
                ));
            }
            if RESERVED_NAMES.contains(&field.name.as_str()) {
                return Err(format!("field name '{}' is reserved", field.name));
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(format!("duplicate field '{}'", field.name));
            }
        }

        // A blank first cell marks a row as an empty placeholder, so the
        // first field must never legitimately be blank.
        let first = &self.fields[0];
        if !first.required {
            return Err(format!(
                "first field '{}' must be required (a blank first cell marks a row as empty)",
                first.name
            ));
        }

        Ok(())
    }
}

/// Lowercase ASCII identifier: letter first, then letters/digits/underscores.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
