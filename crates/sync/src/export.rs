use tracing::info;

use sheetmirror_core::layout;
use sheetmirror_core::schema::Schema;
use sheetmirror_core::sheet::Worksheet;
use sheetmirror_core::store::RecordStore;

use crate::error::SyncError;

/// Overwrite the sheet's data region with one row per store record.
///
/// Full rewrite, not a diff: every row below the header is dropped and
/// rebuilt, then everything lands in a single commit. Row placement is
/// deterministic (records ordered by id), so re-export is idempotent. The
/// store is never mutated. Returns the number of record rows written.
pub fn export<S, W>(store: &S, sheet: &mut W, schema: &Schema) -> Result<usize, SyncError>
where
    S: RecordStore,
    W: Worksheet,
{
    sheet.reload()?;
    let records = store.list()?;

    let rows = sheet.num_rows();
    if rows > 1 {
        sheet.delete_rows(layout::FIRST_DATA_ROW, rows - 1);
    }

    for (i, title) in layout::header_titles(schema).iter().enumerate() {
        sheet.set_cell(layout::HEADER_ROW, i + 1, title);
    }

    let error_col = layout::error_col(schema.field_count());
    for (i, record) in records.iter().enumerate() {
        let row = layout::FIRST_DATA_ROW + i;
        sheet.set_cell(row, layout::ID_COL, &record.id.to_string());
        for (f, field) in schema.fields.iter().enumerate() {
            sheet.set_cell(row, layout::field_col(f), record.value(&field.name));
        }
        // Reserved for the import pass; export has no validation to report.
        sheet.set_cell(row, error_col, "");
    }

    sheet.commit()?;
    info!(records = records.len(), "export pass complete");
    Ok(records.len())
}
