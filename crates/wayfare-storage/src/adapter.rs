// SPDX-FileCopyrightText: 2026 Wayfare Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter and CheckpointStore traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use wayfare_config::model::StorageConfig;
use wayfare_core::{
    AdapterType, CheckpointStore, ConversationState, HealthStatus, PluginAdapter,
    StorageAdapter, WayfareError,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    pub fn db(&self) -> Result<&Database, WayfareError> {
        self.db.get().ok_or_else(|| WayfareError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    /// Clone of the shared connection handle, for wiring the memory store.
    pub fn connection(&self) -> Result<tokio_rusqlite::Connection, WayfareError> {
        Ok(self.db()?.connection().clone())
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, WayfareError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), WayfareError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), WayfareError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| WayfareError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), WayfareError> {
        self.db()?.close().await
    }
}

#[async_trait]
impl CheckpointStore for SqliteStorage {
    async fn save(&self, state: &ConversationState) -> Result<(), WayfareError> {
        queries::checkpoints::upsert_checkpoint(self.db()?, state).await
    }

    async fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, WayfareError> {
        queries::checkpoints::get_checkpoint(self.db()?, thread_id).await
    }
}
