// CSV-file worksheet backing

use std::path::{Path, PathBuf};

use sheetmirror_core::error::SheetError;
use sheetmirror_core::sheet::Worksheet;

use crate::grid::Grid;

/// Worksheet stored as a CSV file. `reload` re-reads the whole file into
/// the local snapshot; `commit` rewrites the whole file from it. A missing
/// file reads as an empty grid, so a first export creates the sheet.
#[derive(Debug)]
pub struct CsvSheet {
    path: PathBuf,
    local: Grid,
}

impl CsvSheet {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SheetError> {
        let mut sheet = Self {
            path: path.into(),
            local: Grid::default(),
        };
        sheet.reload()?;
        Ok(sheet)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Worksheet for CsvSheet {
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
        if !self.path.exists() {
            self.local = Grid::default();
            return Ok(());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| SheetError::Io(e.to_string()))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SheetError::Parse(e.to_string()))?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        self.local = Grid::from_rows(rows);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SheetError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| SheetError::Io(e.to_string()))?;

        let empty = [String::new()];
        for row in self.local.rows() {
            // csv cannot represent a zero-field record; pad to one empty cell
            let record: &[String] = if row.is_empty() { &empty } else { row };
            writer
                .write_record(record)
                .map_err(|e| SheetError::Io(e.to_string()))?;
        }

        writer.flush().map_err(|e| SheetError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("sheet.csv")
    }

    #[test]
    fn missing_file_reads_as_empty_grid() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = CsvSheet::open(sheet_path(&dir)).unwrap();
        assert_eq!(sheet.num_rows(), 0);
    }

    #[test]
    fn commit_then_reopen_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = sheet_path(&dir);

        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.set_cell(1, 1, "ID");
        sheet.set_cell(1, 2, "Name");
        sheet.set_cell(2, 1, "1");
        sheet.set_cell(2, 2, "Widget, deluxe");
        sheet.commit().unwrap();

        let reopened = CsvSheet::open(&path).unwrap();
        assert_eq!(reopened.num_rows(), 2);
        assert_eq!(reopened.cell(1, 2), "Name");
        assert_eq!(reopened.cell(2, 2), "Widget, deluxe");
    }

    #[test]
    fn reload_discards_uncommitted_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = sheet_path(&dir);

        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.set_cell(1, 1, "ID");
        sheet.commit().unwrap();

        sheet.set_cell(1, 1, "scratch");
        sheet.reload().unwrap();
        assert_eq!(sheet.cell(1, 1), "ID");
    }

    #[test]
    fn ragged_rows_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = sheet_path(&dir);
        std::fs::write(&path, "ID,Name,Errors\n1,Widget\n").unwrap();

        let sheet = CsvSheet::open(&path).unwrap();
        assert_eq!(sheet.num_rows(), 2);
        assert_eq!(sheet.cell(2, 2), "Widget");
        assert_eq!(sheet.cell(2, 3), "");
    }

    #[test]
    fn external_file_edit_is_picked_up_by_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = sheet_path(&dir);

        let mut sheet = CsvSheet::open(&path).unwrap();
        sheet.set_cell(1, 1, "ID");
        sheet.commit().unwrap();

        std::fs::write(&path, "ID\n42\n").unwrap();
        sheet.reload().unwrap();
        assert_eq!(sheet.num_rows(), 2);
        assert_eq!(sheet.cell(2, 1), "42");
    }
}
