// Worksheet backings - CSV files and in-memory grids

pub mod csv;
pub mod memory;

mod grid;

pub use self::csv::CsvSheet;
pub use self::memory::MemorySheet;
