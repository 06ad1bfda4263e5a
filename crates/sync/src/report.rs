use std::collections::HashSet;

use serde::Serialize;

use sheetmirror_core::record::RecordId;

/// Summary of one import pass. Observational only — by the time it is
/// returned the store and the sheet have already been mutated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub deleted: usize,
    /// Identities proven present during the pass; their complement was
    /// deleted.
    pub confirmed: HashSet<RecordId>,
}

impl ImportReport {
    pub fn data_rows(&self) -> usize {
        self.created + self.updated + self.rejected + self.skipped
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("report serializes")
    }
}
