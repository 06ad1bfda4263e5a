use tracing::{debug, info};

use sheetmirror_core::layout;
use sheetmirror_core::record::{FieldValues, RecordId};
use sheetmirror_core::schema::Schema;
use sheetmirror_core::sheet::Worksheet;
use sheetmirror_core::store::{RecordStore, WriteOutcome};

use crate::error::SyncError;
use crate::report::ImportReport;

/// Outcome of reconciling one data row against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Created(RecordId),
    Updated(RecordId),
    /// Validation rejected the row. `confirmed` carries the existing
    /// record's id when the rejection happened on the update path — the
    /// record still exists and must not be swept by the cleanup.
    Rejected {
        confirmed: Option<RecordId>,
        errors: Vec<String>,
    },
}

/// Reconcile the sheet into the store, then mirror-clean the store.
///
/// Each data row becomes a create, an update, or a skip; every identity
/// confirmed present survives, everything else is deleted at the end of the
/// pass. The sheet gets identity backfills and error-cell updates back —
/// data cells are never rewritten here.
///
/// Validation failures are per-row and non-fatal. Only store or sheet
/// transport failures abort the pass; store mutations applied before such a
/// failure remain applied.
pub fn import<W, S>(sheet: &mut W, store: &mut S, schema: &Schema) -> Result<ImportReport, SyncError>
where
    W: Worksheet,
    S: RecordStore,
{
    // The sheet may have been edited externally since it was last loaded;
    // a stale snapshot here would resurrect deleted rows or miss new ones.
    sheet.reload()?;

    let mut report = ImportReport::default();
    let rows = sheet.num_rows();
    if rows < layout::FIRST_DATA_ROW {
        // Header only (or nothing): no data region, no cleanup.
        return Ok(report);
    }

    let error_col = layout::error_col(schema.field_count());

    for row in layout::FIRST_DATA_ROW..=rows {
        let first_field = sheet.cell(row, layout::field_col(0));
        if first_field.trim().is_empty() {
            // Placeholder row, not a deletion signal.
            report.skipped += 1;
            continue;
        }

        // A non-numeric id cell is advisory garbage: same as a stale hint.
        let hint = sheet.cell(row, layout::ID_COL).trim().parse::<RecordId>().ok();

        let mut values = FieldValues::new();
        for (f, field) in schema.fields.iter().enumerate() {
            values.insert(field.name.clone(), sheet.cell(row, layout::field_col(f)));
        }

        let outcome = reconcile_row(store, hint, &values)?;
        debug!(row, ?outcome, "row reconciled");

        match outcome {
            RowOutcome::Created(id) => {
                report.confirmed.insert(id);
                report.created += 1;
                // The store-assigned id replaces whatever the cell held.
                sheet.set_cell(row, layout::ID_COL, &id.to_string());
                sheet.set_cell(row, error_col, "");
            }
            RowOutcome::Updated(id) => {
                report.confirmed.insert(id);
                report.updated += 1;
                sheet.set_cell(row, error_col, "");
            }
            RowOutcome::Rejected { confirmed, errors } => {
                if let Some(id) = confirmed {
                    report.confirmed.insert(id);
                }
                report.rejected += 1;
                sheet.set_cell(row, error_col, &errors.join(", "));
            }
        }
    }

    report.deleted = store.delete_all_except(&report.confirmed)?;
    sheet.commit()?;

    info!(
        created = report.created,
        updated = report.updated,
        rejected = report.rejected,
        skipped = report.skipped,
        deleted = report.deleted,
        "import pass complete"
    );
    Ok(report)
}

/// Find-or-create against an advisory id hint, in one step.
///
/// A hint that matches no record is stale (or hand-typed); it never becomes
/// the new identity — the store assigns a fresh one on the create path.
pub fn reconcile_row<S: RecordStore>(
    store: &mut S,
    hint: Option<RecordId>,
    values: &FieldValues,
) -> Result<RowOutcome, SyncError> {
    if let Some(id) = hint {
        if store.find(id)?.is_some() {
            return Ok(match store.update(id, values)? {
                WriteOutcome::Ok(id) => RowOutcome::Updated(id),
                WriteOutcome::Invalid(errors) => RowOutcome::Rejected {
                    confirmed: Some(id),
                    errors,
                },
            });
        }
    }

    Ok(match store.create(values)? {
        WriteOutcome::Ok(id) => RowOutcome::Created(id),
        WriteOutcome::Invalid(errors) => RowOutcome::Rejected {
            confirmed: None,
            errors,
        },
    })
}
