use serde::Deserialize;

use sheetmirror_core::schema::{FieldDef, Schema};

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Sync profile
// ---------------------------------------------------------------------------

/// One store/sheet pairing plus the field schema both sides share.
#[derive(Debug, Deserialize)]
pub struct SyncProfile {
    pub name: String,
    pub store: StoreConfig,
    pub sheet: SheetConfig,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct SheetConfig {
    pub path: String,
}

impl SyncProfile {
    pub fn from_toml(input: &str) -> Result<Self, SyncError> {
        let profile: SyncProfile =
            toml::from_str(input).map_err(|e| SyncError::ConfigParse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if self.name.trim().is_empty() {
            return Err(SyncError::ConfigValidation("name must not be empty".into()));
        }
        if self.store.path.trim().is_empty() {
            return Err(SyncError::ConfigValidation(
                "store.path must not be empty".into(),
            ));
        }
        if self.sheet.path.trim().is_empty() {
            return Err(SyncError::ConfigValidation(
                "sheet.path must not be empty".into(),
            ));
        }
        self.schema().validate().map_err(SyncError::ConfigValidation)
    }

    /// The field schema shared by the store and the grid layout.
    pub fn schema(&self) -> Schema {
        Schema::new(self.fields.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
