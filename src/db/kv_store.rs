use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::{
    db::{helpers::parse_datetime, Database},
    storage::StorageBackend,
};

/// One stored key with the JSON text saved under it.
#[derive(Debug, Clone, PartialEq)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

fn row_to_entry(row: &Row) -> Result<KvEntry> {
    let updated_at: String = row.get("updated_at")?;

    Ok(KvEntry {
        key: row.get("key")?,
        value: row.get("value")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub fn get_entry(&self, key: &str) -> Result<Option<KvEntry>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT key, value, updated_at
                 FROM kv_store
                 WHERE key = ?1",
            )?;

            let mut rows = stmt.query(params![key])?;
            let entry = match rows.next()? {
                Some(row) => Some(row_to_entry(row)?),
                None => None,
            };
            Ok(entry)
        })
    }

    pub fn put_value(&self, key: &str, value: &str) -> Result<()> {
        self.execute(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to store '{key}'"))?;
            Ok(())
        })
    }

    pub fn delete_value(&self, key: &str) -> Result<()> {
        self.execute(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
                .with_context(|| format!("failed to delete '{key}'"))?;
            Ok(())
        })
    }
}

impl StorageBackend for Database {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_entry(key)?.map(|entry| entry.value))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.put_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.delete_value(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_value() {
        let db = Database::open_in_memory().unwrap();
        db.put_value("clients", "[]").unwrap();
        db.put_value("clients", r#"[{"id":1}]"#).unwrap();

        let entry = db.get_entry("clients").unwrap().unwrap();
        assert_eq!(entry.value, r#"[{"id":1}]"#);
        assert_eq!(entry.key, "clients");
    }

    #[test]
    fn missing_key_reads_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.read("sessions").unwrap(), None);
        assert_eq!(db.get_entry("sessions").unwrap(), None);
    }

    #[test]
    fn delete_removes_key() {
        let db = Database::open_in_memory().unwrap();
        db.write("currentUser", "{}").unwrap();
        db.remove("currentUser").unwrap();
        assert_eq!(db.read("currentUser").unwrap(), None);
    }

    #[test]
    fn file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fittrack.sqlite3");

        let db = Database::new(path.clone()).unwrap();
        db.write("sessions", "[]").unwrap();
        drop(db);

        let reopened = Database::new(path).unwrap();
        assert_eq!(reopened.read("sessions").unwrap().as_deref(), Some("[]"));
    }
}
