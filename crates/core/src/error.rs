use std::fmt;

/// Transport failure in the record store backend. Always fatal to a pass;
/// validation failures are not errors and travel as `WriteOutcome::Invalid`.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying database error (open, prepare, execute).
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Transport failure in the worksheet backing.
#[derive(Debug)]
pub enum SheetError {
    /// File or provider IO error.
    Io(String),
    /// The backing exists but its contents cannot be read as a grid.
    Parse(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "sheet IO error: {msg}"),
            Self::Parse(msg) => write!(f, "sheet parse error: {msg}"),
        }
    }
}

impl std::error::Error for SheetError {}
