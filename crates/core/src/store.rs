use std::collections::HashSet;

use crate::error::StoreError;
use crate::record::{FieldValues, Record, RecordId};

/// Result of a create or update attempt. `Invalid` is the recoverable case:
/// the values failed store-side rules and the messages belong in the row's
/// error cell. Transport failures surface as `Err(StoreError)` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Ok(RecordId),
    Invalid(Vec<String>),
}

/// The persistent collection holding records, keyed by identity.
pub trait RecordStore {
    /// All records, ordered by identity ascending. The ordering is part of
    /// the contract: export row placement must be deterministic.
    fn list(&self) -> Result<Vec<Record>, StoreError>;

    fn find(&self, id: RecordId) -> Result<Option<Record>, StoreError>;

    /// Persist a new record. The store assigns the identity.
    fn create(&mut self, values: &FieldValues) -> Result<WriteOutcome, StoreError>;

    /// Overwrite an existing record's field values.
    fn update(&mut self, id: RecordId, values: &FieldValues) -> Result<WriteOutcome, StoreError>;

    /// Mirror cleanup: delete every record whose id is not in `keep` and
    /// return how many were deleted. Destructive by design — an empty `keep`
    /// set empties the store.
    fn delete_all_except(&mut self, keep: &HashSet<RecordId>) -> Result<usize, StoreError>;
}
