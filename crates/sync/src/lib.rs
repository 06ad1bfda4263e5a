//! `sheetmirror-sync` — the export and import passes.
//!
//! Pure pass crate: operates through the `RecordStore` and `Worksheet`
//! traits from `sheetmirror-core`. No database or file dependencies.

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod report;

pub use config::SyncProfile;
pub use error::SyncError;
pub use export::export;
pub use import::{import, reconcile_row, RowOutcome};
pub use report::ImportReport;
