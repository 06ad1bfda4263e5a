//! `sheetmirror-core` — shared model for the sync passes.
//!
//! Pure types crate: records, the field schema, the fixed grid layout, and
//! the `RecordStore` / `Worksheet` traits the passes operate through. No IO.

pub mod error;
pub mod layout;
pub mod record;
pub mod schema;
pub mod sheet;
pub mod store;

pub use error::{SheetError, StoreError};
pub use record::{FieldValues, Record, RecordId};
pub use schema::{FieldDef, FieldKind, Schema};
pub use sheet::Worksheet;
pub use store::{RecordStore, WriteOutcome};
