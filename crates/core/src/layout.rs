//! Fixed grid layout shared with externally edited sheets.
//!
//! Column 1 = `ID`, columns 2..=(1+F) = schema fields in order, column
//! (2+F) = `Errors`. Row 1 is the header; data starts at row 2. All
//! addressing is 1-indexed. Existing sheets depend on this layout bit for
//! bit, so the titles and positions here are a compatibility contract.

use crate::schema::Schema;

pub const HEADER_ROW: usize = 1;
pub const FIRST_DATA_ROW: usize = 2;
pub const ID_COL: usize = 1;

pub const ID_TITLE: &str = "ID";
pub const ERRORS_TITLE: &str = "Errors";

/// Grid column for the field at `index` in schema order.
pub fn field_col(index: usize) -> usize {
    2 + index
}

/// Grid column of the trailing error-message cell.
pub fn error_col(field_count: usize) -> usize {
    2 + field_count
}

/// Header row titles: `ID`, one title per field, `Errors`.
pub fn header_titles(schema: &Schema) -> Vec<String> {
    let mut titles = Vec::with_capacity(schema.field_count() + 2);
    titles.push(ID_TITLE.to_string());
    for field in &schema.fields {
        titles.push(title_case(&field.name));
    }
    titles.push(ERRORS_TITLE.to_string());
    titles
}

/// `unit_price` -> `Unit Price`.
fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
