//! In-memory worksheet with an explicit remote side.
//!
//! `remote` stands in for the external document; `local` is the pass's
//! snapshot. `reload` copies remote into local, `commit` publishes local
//! back. The `*_remote` methods simulate edits made by someone else between
//! passes, which is what the import precondition is about.

use sheetmirror_core::error::SheetError;
use sheetmirror_core::sheet::Worksheet;

use crate::grid::Grid;

#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    remote: Grid,
    local: Grid,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed both sides with the given rows, as if freshly loaded.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = String>,
    {
        let rows: Vec<Vec<String>> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        let grid = Grid::from_rows(rows);
        Self {
            remote: grid.clone(),
            local: grid,
        }
    }

    /// Committed (remote) state, for assertions.
    pub fn remote_rows(&self) -> &[Vec<String>] {
        self.remote.rows()
    }

    pub fn remote_cell(&self, row: usize, col: usize) -> String {
        self.remote.cell(row, col)
    }

    /// Simulate an external edit: change a remote cell without touching the
    /// local snapshot.
    pub fn edit_remote(&mut self, row: usize, col: usize, value: &str) {
        self.remote.set_cell(row, col, value);
    }

    /// Simulate an external row deletion.
    pub fn delete_remote_rows(&mut self, start: usize, count: usize) {
        self.remote.delete_rows(start, count);
    }
}

impl Worksheet for MemorySheet {
    fn num_rows(&self) -> usize {
        self.local.num_rows()
    }

    fn cell(&self, row: usize, col: usize) -> String {
        self.local.cell(row, col)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: &str) {
        self.local.set_cell(row, col, value);
    }

    fn delete_rows(&mut self, start: usize, count: usize) {
        self.local.delete_rows(start, count);
    }

    fn reload(&mut self) -> Result<(), SheetError> {
        self.local = self.remote.clone();
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SheetError> {
        self.remote = self.local.clone();
        Ok(())
    }
}
