//! # SQLite Key-Value Slot
//!
//! Production [`KvStore`](crate::KvStore) implementation backed by a local
//! SQLite file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SQLite Key-Value Slot                                │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KvConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteKvStore::connect(config).await ← Create pool + run migrations   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────┐                          │
//! │  │  kv_entries                              │                          │
//! │  │  ┌───────────────┬──────────┬─────────┐ │                          │
//! │  │  │ key           │ value    │updated_at│ │                          │
//! │  │  ├───────────────┼──────────┼─────────┤ │                          │
//! │  │  │ cart/products │ [{...}]  │ 2026-...│ │ ← the cart mirror        │
//! │  │  └───────────────┴──────────┴─────────┘ │                          │
//! │  └──────────────────────────────────────────┘                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Readers don't block writers, writers don't block readers
//! - Better crash recovery

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the specified
/// directory into the binary at compile time. No runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

// =============================================================================
// Configuration
// =============================================================================

/// SQLite key-value store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = KvConfig::new("/path/to/basket.db").max_connections(2);
/// let kv = SqliteKvStore::connect(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 2 (a single UI actor needs very little parallelism)
    pub max_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl KvConfig {
    /// Creates a new configuration with the given path.
    /// The file is created on connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        KvConfig {
            database_path: path.into(),
            max_connections: 2,
            connect_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// In-memory SQLite lives and dies with its (single) connection, so the
    /// pool is pinned to one connection.
    pub fn in_memory() -> Self {
        KvConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            connect_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }
}

// =============================================================================
// SQLite Store
// =============================================================================

/// SQLite-backed key-value store.
///
/// Cloning shares the underlying pool, so two handles over the same config
/// see the same slots - that is what lets a fresh
/// [`CartStore`](crate::CartStore) hydrate what a previous one persisted.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Opens (creating if missing) the backing database and runs migrations.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL mode, NORMAL synchronous
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn connect(config: KvConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening key-value store"
        );

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block writers and vice versa
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on a crash - acceptable for a cart mirror
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool created");

        let store = SqliteKvStore { pool };

        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Runs pending schema migrations. Idempotent.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        info!("Running key-value store migrations");
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Checks if the backing database is responsive.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool.
    ///
    /// After calling close, all slot operations will fail.
    pub async fn close(&self) {
        info!("Closing key-value store pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_entries WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "kv get");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let updated_at = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        debug!(key = %key, bytes = value.len(), "kv set");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
