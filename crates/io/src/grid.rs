/// Ragged rectangular grid of string cells, 1-indexed to match the
/// worksheet contract. Rows may have different widths; out-of-range reads
/// are empty, writes grow the grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> String {
        debug_assert!(row >= 1 && col >= 1, "grid is 1-indexed");
        if row == 0 || col == 0 {
            return String::new();
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) {
        debug_assert!(row >= 1 && col >= 1, "grid is 1-indexed");
        if row == 0 || col == 0 {
            return;
        }
        if self.rows.len() < row {
            self.rows.resize(row, Vec::new());
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < col {
            cells.resize(col, String::new());
        }
        cells[col - 1] = value.to_string();
    }

    pub fn delete_rows(&mut self, start: usize, count: usize) {
        debug_assert!(start >= 1, "grid is 1-indexed");
        if start == 0 || count == 0 || start > self.rows.len() {
            return;
        }
        let end = (start - 1 + count).min(self.rows.len());
        self.rows.drain(start - 1..end);
    }
}
