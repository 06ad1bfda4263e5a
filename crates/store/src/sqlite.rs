// Record persistence over SQLite

use std::collections::HashSet;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use sheetmirror_core::error::StoreError;
use sheetmirror_core::record::{FieldValues, Record, RecordId};
use sheetmirror_core::schema::Schema;
use sheetmirror_core::store::{RecordStore, WriteOutcome};

use crate::validation::validate;
use crate::STORE_FORMAT_VERSION;

/// SQLite-backed `RecordStore`. One table, one column per schema field,
/// everything stored as text — the sheet is the interchange surface and the
/// validation layer decides what parses.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    schema: Schema,
}

impl SqliteStore {
    /// Open (or create) a store file for the given schema.
    pub fn open(path: &Path, schema: Schema) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend)?;
        Self::init(conn, schema)
    }

    /// Ephemeral store, used by tests and embedders.
    pub fn open_in_memory(schema: Schema) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::init(conn, schema)
    }

    fn init(conn: Connection, schema: Schema) -> Result<Self, StoreError> {
        schema.validate().map_err(StoreError::Backend)?;
        conn.execute_batch(&table_ddl(&schema)).map_err(backend)?;

        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES ('format_version', ?1)",
            params![STORE_FORMAT_VERSION.to_string()],
        )
        .map_err(backend)?;

        let version: String = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .map_err(backend)?;
        if version != STORE_FORMAT_VERSION.to_string() {
            return Err(StoreError::Backend(format!(
                "unsupported store format version {version}"
            )));
        }

        Ok(Self { conn, schema })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of records currently persisted.
    pub fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
            .map_err(backend)?;
        Ok(n as usize)
    }

    fn field_columns(&self) -> String {
        self.schema
            .fields
            .iter()
            .map(|f| format!("\"{}\"", f.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn row_to_record(&self, row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
        let id: RecordId = row.get(0)?;
        let mut values = FieldValues::new();
        for (i, field) in self.schema.fields.iter().enumerate() {
            values.insert(field.name.clone(), row.get(i + 1)?);
        }
        Ok(Record { id, values })
    }

    fn field_args<'a>(&self, values: &'a FieldValues) -> Vec<&'a str> {
        self.schema
            .fields
            .iter()
            .map(|f| values.get(&f.name).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

impl RecordStore for SqliteStore {
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        let sql = format!(
            "SELECT id, {} FROM records ORDER BY id",
            self.field_columns()
        );
        let mut stmt = self.conn.prepare(&sql).map_err(backend)?;
        let rows = stmt
            .query_map([], |row| self.row_to_record(row))
            .map_err(backend)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(backend)?);
        }
        Ok(records)
    }

    fn find(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let sql = format!(
            "SELECT id, {} FROM records WHERE id = ?1",
            self.field_columns()
        );
        self.conn
            .query_row(&sql, params![id], |row| self.row_to_record(row))
            .optional()
            .map_err(backend)
    }

    fn create(&mut self, values: &FieldValues) -> Result<WriteOutcome, StoreError> {
        let errors = validate(&self.schema, values);
        if !errors.is_empty() {
            return Ok(WriteOutcome::Invalid(errors));
        }

        let placeholders = (1..=self.schema.field_count() + 2)
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO records ({}, created_at, updated_at) VALUES ({placeholders})",
            self.field_columns()
        );

        let now = chrono::Utc::now().to_rfc3339();
        let mut args: Vec<&str> = self.field_args(values);
        args.push(&now);
        args.push(&now);

        self.conn
            .execute(&sql, rusqlite::params_from_iter(args))
            .map_err(backend)?;
        Ok(WriteOutcome::Ok(self.conn.last_insert_rowid()))
    }

    fn update(&mut self, id: RecordId, values: &FieldValues) -> Result<WriteOutcome, StoreError> {
        let errors = validate(&self.schema, values);
        if !errors.is_empty() {
            return Ok(WriteOutcome::Invalid(errors));
        }

        let assignments = self
            .schema
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("\"{}\" = ?{}", f.name, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let n = self.schema.field_count();
        let sql = format!(
            "UPDATE records SET {assignments}, updated_at = ?{} WHERE id = ?{}",
            n + 1,
            n + 2
        );

        let now = chrono::Utc::now().to_rfc3339();
        let mut args: Vec<rusqlite::types::Value> = self
            .field_args(values)
            .into_iter()
            .map(|v| v.to_string().into())
            .collect();
        args.push(now.into());
        args.push(id.into());

        self.conn
            .execute(&sql, rusqlite::params_from_iter(args))
            .map_err(backend)?;
        Ok(WriteOutcome::Ok(id))
    }

    fn delete_all_except(&mut self, keep: &HashSet<RecordId>) -> Result<usize, StoreError> {
        if keep.is_empty() {
            // Nothing confirmed: the mirror is empty, so the store becomes empty.
            return self
                .conn
                .execute("DELETE FROM records", [])
                .map_err(backend);
        }

        let placeholders = (1..=keep.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("DELETE FROM records WHERE id NOT IN ({placeholders})");

        let mut ids: Vec<RecordId> = keep.iter().copied().collect();
        ids.sort_unstable();

        self.conn
            .execute(&sql, rusqlite::params_from_iter(ids))
            .map_err(backend)
    }
}

fn table_ddl(schema: &Schema) -> String {
    let mut ddl = String::from("CREATE TABLE IF NOT EXISTS records (\n");
    ddl.push_str("    id INTEGER PRIMARY KEY AUTOINCREMENT,\n");
    for field in &schema.fields {
        ddl.push_str(&format!("    \"{}\" TEXT NOT NULL DEFAULT '',\n", field.name));
    }
    ddl.push_str("    created_at TEXT NOT NULL,\n");
    ddl.push_str("    updated_at TEXT NOT NULL\n");
    ddl.push_str(");\n\n");
    ddl.push_str(
        "CREATE TABLE IF NOT EXISTS meta (\n    key TEXT PRIMARY KEY,\n    value TEXT NOT NULL\n);\n",
    );
    ddl
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use sheetmirror_core::schema::{FieldDef, FieldKind};

    fn product_schema() -> Schema {
        Schema::new(vec![
            FieldDef {
                name: "name".into(),
                kind: FieldKind::Text,
                required: true,
            },
            FieldDef {
                name: "description".into(),
                kind: FieldKind::Text,
                required: false,
            },
            FieldDef {
                name: "price".into(),
                kind: FieldKind::Decimal,
                required: false,
            },
            FieldDef {
                name: "stock".into(),
                kind: FieldKind::Integer,
                required: false,
            },
            FieldDef {
                name: "category".into(),
                kind: FieldKind::Text,
                required: false,
            },
        ])
    }

    fn values(entries: &[(&str, &str)]) -> FieldValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn create_ok(store: &mut SqliteStore, entries: &[(&str, &str)]) -> RecordId {
        match store.create(&values(entries)).unwrap() {
            WriteOutcome::Ok(id) => id,
            WriteOutcome::Invalid(errors) => panic!("unexpected validation errors: {errors:?}"),
        }
    }

    #[test]
    fn create_assigns_ascending_ids() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        let a = create_ok(&mut store, &[("name", "Widget")]);
        let b = create_ok(&mut store, &[("name", "Gadget")]);
        assert!(b > a);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn list_is_ordered_by_id() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        for name in ["c", "a", "b"] {
            create_ok(&mut store, &[("name", name)]);
        }
        let records = store.list().unwrap();
        let ids: Vec<RecordId> = records.iter().map(|r| r.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(records[0].value("name"), "c");
    }

    #[test]
    fn find_round_trips_all_fields() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        let id = create_ok(
            &mut store,
            &[
                ("name", "Widget"),
                ("description", "A widget"),
                ("price", "9.99"),
                ("stock", "3"),
                ("category", "tools"),
            ],
        );

        let record = store.find(id).unwrap().unwrap();
        assert_eq!(record.value("name"), "Widget");
        assert_eq!(record.value("price"), "9.99");
        assert_eq!(record.value("stock"), "3");
        assert!(store.find(id + 999).unwrap().is_none());
    }

    #[test]
    fn invalid_create_persists_nothing() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        let outcome = store.create(&values(&[("price", "cheap")])).unwrap();
        match outcome {
            WriteOutcome::Invalid(errors) => {
                assert_eq!(errors, vec!["name can't be blank", "price must be a number"]);
            }
            WriteOutcome::Ok(id) => panic!("expected rejection, got id {id}"),
        }
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn update_overwrites_fields() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        let id = create_ok(&mut store, &[("name", "Widget"), ("stock", "3")]);

        let outcome = store
            .update(id, &values(&[("name", "Widget v2")]))
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Ok(id));

        let record = store.find(id).unwrap().unwrap();
        assert_eq!(record.value("name"), "Widget v2");
        // Unmapped fields overwrite to blank: the sheet row is the whole truth.
        assert_eq!(record.value("stock"), "");
    }

    #[test]
    fn invalid_update_leaves_record_untouched() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        let id = create_ok(&mut store, &[("name", "Widget"), ("stock", "3")]);

        let outcome = store
            .update(id, &values(&[("name", ""), ("stock", "lots")]))
            .unwrap();
        match outcome {
            WriteOutcome::Invalid(errors) => assert_eq!(errors.len(), 2),
            WriteOutcome::Ok(id) => panic!("expected rejection, got id {id}"),
        }

        let record = store.find(id).unwrap().unwrap();
        assert_eq!(record.value("name"), "Widget");
        assert_eq!(record.value("stock"), "3");
    }

    #[test]
    fn delete_all_except_keeps_only_listed_ids() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        let a = create_ok(&mut store, &[("name", "a")]);
        let _b = create_ok(&mut store, &[("name", "b")]);
        let c = create_ok(&mut store, &[("name", "c")]);

        let deleted = store
            .delete_all_except(&HashSet::from([a, c]))
            .unwrap();
        assert_eq!(deleted, 1);

        let ids: Vec<RecordId> = store.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn delete_all_except_empty_set_empties_store() {
        let mut store = SqliteStore::open_in_memory(product_schema()).unwrap();
        create_ok(&mut store, &[("name", "a")]);
        create_ok(&mut store, &[("name", "b")]);

        let deleted = store.delete_all_except(&HashSet::new()).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn reopen_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.db");

        let id = {
            let mut store = SqliteStore::open(&path, product_schema()).unwrap();
            create_ok(&mut store, &[("name", "Widget"), ("price", "9.99")])
        };

        let store = SqliteStore::open(&path, product_schema()).unwrap();
        let record = store.find(id).unwrap().unwrap();
        assert_eq!(record.value("name"), "Widget");
        assert_eq!(record.value("price"), "9.99");
    }

    #[test]
    fn rejects_invalid_schema() {
        let err = SqliteStore::open_in_memory(Schema::new(vec![])).unwrap_err();
        assert!(err.to_string().contains("at least one field"));
    }
}
