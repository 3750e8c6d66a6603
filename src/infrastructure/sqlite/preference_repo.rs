use crate::domain::error::DomainError;
use crate::domain::ports::preference_store::{PreferenceKey, PreferenceStore};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

pub struct SqlitePreferenceRepo {
    conn: Mutex<Connection>,
}

impl SqlitePreferenceRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl PreferenceStore for SqlitePreferenceRepo {
    fn get(&self, key: PreferenceKey) -> Result<Option<String>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| DomainError::Database(format!("Failed to read {key}: {e}")))?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }

    fn set(&self, key: PreferenceKey, value: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key.as_str(), value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save {key}: {e}")))?;
        Ok(())
    }

    fn remove(&self, key: PreferenceKey) -> Result<bool, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key.as_str()])
            .map_err(|e| DomainError::Database(format!("Failed to clear {key}: {e}")))?;
        Ok(rows > 0)
    }
}
