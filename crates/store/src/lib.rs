// SQLite-backed record store

pub mod sqlite;
pub mod validation;

pub use sqlite::SqliteStore;

/// Store schema version. Increment when the table layout changes in a way
/// old databases can't read.
pub const STORE_FORMAT_VERSION: u32 = 1;
