use std::fmt;

use sheetmirror_core::error::{SheetError, StoreError};

#[derive(Debug)]
pub enum SyncError {
    /// TOML parse / deserialization error in a sync profile.
    ConfigParse(String),
    /// Sync profile validation error (bad field list, reserved name, etc.).
    ConfigValidation(String),
    /// Record store transport failure. Fatal to the pass.
    Store(StoreError),
    /// Worksheet transport failure. Fatal to the pass.
    Sheet(SheetError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "profile parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "profile validation error: {msg}"),
            Self::Store(e) => write!(f, "{e}"),
            Self::Sheet(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<SheetError> for SyncError {
    fn from(e: SheetError) -> Self {
        Self::Sheet(e)
    }
}
