use crate::error::SheetError;

/// The external rectangular grid both passes read and write.
///
/// Addressing is 1-indexed; row 1 is the header. Implementations keep a
/// local snapshot of the grid: `reload` replaces the snapshot from the
/// backing (discarding uncommitted local edits), mutators touch only the
/// snapshot, and `commit` flushes it back in one batch. There is no hidden
/// cache between the two.
pub trait Worksheet {
    /// Number of rows in the local snapshot, header included.
    fn num_rows(&self) -> usize;

    /// Cell contents; out-of-range cells read as empty.
    fn cell(&self, row: usize, col: usize) -> String;

    /// Set a cell, growing the grid as needed.
    fn set_cell(&mut self, row: usize, col: usize, value: &str);

    /// Remove `count` rows starting at `start`; later rows shift up.
    fn delete_rows(&mut self, start: usize, count: usize);

    /// Replace the local snapshot from the backing.
    fn reload(&mut self) -> Result<(), SheetError>;

    /// Flush the local snapshot to the backing as one batch.
    fn commit(&mut self) -> Result<(), SheetError>;
}
