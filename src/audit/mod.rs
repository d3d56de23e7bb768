//! Audit log — SQLite-based operation history.
//!
//! Stores a record of every vault operation (unlock, add, delete,
//! rotate, etc.) in a local SQLite database at `<vault_dir>/audit.db`.
//! Secret values and passwords are never written here, only operation
//! names and secret names.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::errors::{PassVaultError, Result};

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub secret_name: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database at `<vault_dir>/audit.db`.
    ///
    /// Returns `None` if the database can't be opened — callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(vault_dir: &Path) -> Option<Self> {
        let db_path = Self::db_path(vault_dir);
        let conn = Connection::open(&db_path).ok()?;

        // Set restrictive permissions on the audit database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        // Create the table if it doesn't exist.
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp   TEXT NOT NULL,
                operation   TEXT NOT NULL,
                secret_name TEXT,
                details     TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget — errors are silently ignored.
    pub fn log(&self, operation: &str, secret_name: Option<&str>, details: Option<&str>) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, secret_name, details)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![now, operation, secret_name, details],
        );
    }

    /// Query the most recent entries, newest first.
    pub fn query(&self, limit: usize) -> Result<Vec<AuditEntry>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, secret_name, details
                 FROM audit_log
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(|e| PassVaultError::AuditError(format!("query prepare: {e}")))?;

        let rows = stmt
            .query_map([limit_i64], |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp,
                    operation: row.get(2)?,
                    secret_name: row.get(3)?,
                    details: row.get(4)?,
                })
            })
            .map_err(|e| PassVaultError::AuditError(format!("query exec: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| PassVaultError::AuditError(format!("row parse: {e}")))?);
        }

        Ok(entries)
    }

    /// Return the path to the audit database (for testing/display).
    pub fn db_path(vault_dir: &Path) -> PathBuf {
        vault_dir.join("audit.db")
    }
}

/// Convenience helper: log an audit event for a vault directory.
///
/// Opens the audit database, logs the event, and silently ignores any
/// errors.  Safe to call from any command — it never fails the parent
/// operation.
pub fn log_audit(vault_dir: &Path, op: &str, secret_name: Option<&str>, details: Option<&str>) {
    if let Some(audit) = AuditLog::open(vault_dir) {
        audit.log(op, secret_name, details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_database() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path());
        assert!(audit.is_some(), "should open successfully");
        assert!(dir.path().join("audit.db").exists());
    }

    #[test]
    fn log_and_query_roundtrip() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path()).unwrap();

        audit.log("add", Some("GitHub"), Some("added"));
        audit.log("add", Some("AWS"), Some("added"));
        audit.log("delete", Some("OldEntry"), None);

        let entries = audit.query(10).unwrap();
        assert_eq!(entries.len(), 3);

        // Most recent first.
        assert_eq!(entries[0].operation, "delete");
        assert_eq!(entries[1].operation, "add");
        assert_eq!(entries[2].operation, "add");
    }

    #[test]
    fn query_with_limit() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::open(dir.path()).unwrap();

        for i in 0..10 {
            audit.log("unlock", None, Some(&format!("attempt {i}")));
        }

        let entries = audit.query(3).unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn log_audit_helper_never_panics_on_bad_dir() {
        // Pointing at a file (not a directory) makes open fail; the
        // helper must swallow that.
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain-file");
        std::fs::write(&file, b"x").unwrap();
        log_audit(&file, "unlock", None, None);
    }
}
