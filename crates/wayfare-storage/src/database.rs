// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use tokio_rusqlite::Connection;
use tracing::debug;

use wayfare_core::WayfareError;

use crate::migrations;

/// Helper to convert tokio_rusqlite errors into WayfareError::Storage.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> WayfareError {
    WayfareError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database.
///
/// Cloning the underlying [`Connection`] is cheap; all clones funnel
/// through the same background thread.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path`, applies
    /// PRAGMAs, and runs all pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, WayfareError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| WayfareError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path).await.map_err(|e| map_tr_err(e.into()))?;
        Self::setup(conn, wal_mode).await
    }

    /// Opens an in-memory database with migrations applied. Test helper.
    pub async fn open_in_memory() -> Result<Self, WayfareError> {
        let conn = Connection::open_in_memory().await.map_err(|e| map_tr_err(e.into()))?;
        Self::setup(conn, false).await
    }

    async fn setup(conn: Connection, wal_mode: bool) -> Result<Self, WayfareError> {
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| {
            migrations::run_migrations(conn)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))
        })
        .await
        .map_err(map_tr_err)?;

        debug!("database open, migrations applied");
        Ok(Self { conn })
    }

    /// Returns the shared connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL and closes the connection.
    pub async fn close(&self) -> Result<(), WayfareError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
