// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session and transaction boundary.
//!
//! A [`DataAccess`] owns a bounded connection pool and hands out units
//! of work. Each unit of work maps to exactly one pooled connection and
//! one transaction: commit if the caller's closure returns `Ok`,
//! rollback otherwise. Nothing written inside a unit of work is visible
//! outside it until commit.
//!
//! The synchronous and asynchronous entry points share one
//! implementation; the asynchronous variant only moves the closure onto
//! a blocking thread at the connection-execution boundary.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use diesel::SqliteConnection;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use tracing::{debug, warn};

use crate::backend;
use crate::error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory` receives a unique sequential ID so
/// tests are isolated without time-based collisions.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
type PooledSqliteConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Sizing and wait bounds for the connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Connections the pool keeps open.
    pub pool_size: u32,
    /// Additional connections allowed beyond `pool_size` under load.
    pub max_overflow: u32,
    /// How long a checkout waits for a free connection before failing
    /// with [`PersistenceError::PoolExhausted`].
    pub wait_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pool_size: 5,
            max_overflow: 10,
            wait_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared per-unit-of-work state.
///
/// The connection lives here for the lifetime of the unit of work and
/// is taken out when the unit of work closes. Lazy relationship handles
/// hold an `Arc` to this context; once the slot is empty they are
/// detached and every access fails instead of reopening a connection.
pub(crate) struct SessionCtx {
    conn: Mutex<Option<PooledSqliteConnection>>,
}

impl SessionCtx {
    /// Runs `op` against the live connection, or fails with
    /// [`PersistenceError::DetachedAccess`] if the owning unit of work
    /// has already closed.
    pub(crate) fn with_conn<T>(
        &self,
        association: &'static str,
        op: impl FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| PersistenceError::QueryFailed(String::from("session mutex poisoned")))?;
        let conn = guard
            .as_mut()
            .ok_or(PersistenceError::DetachedAccess { association })?;
        op(conn)
    }
}

/// A connection-scoped unit of work.
///
/// All operations issued through one `UnitOfWork` run on the same
/// connection inside the same transaction and observe each other.
/// Nested logic reuses the unit of work by receiving it as a parameter;
/// the boundary never opens a second transaction on the same
/// connection.
pub struct UnitOfWork {
    ctx: Arc<SessionCtx>,
}

impl UnitOfWork {
    /// Runs `op` against this unit of work's connection.
    pub(crate) fn run<T>(
        &self,
        op: impl FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        self.ctx.with_conn("unit of work", op)
    }

    /// Shares the session context with lazy relationship handles.
    pub(crate) fn ctx(&self) -> Arc<SessionCtx> {
        Arc::clone(&self.ctx)
    }
}

/// Explicitly constructed data-access context owning the connection
/// pool. There is no ambient global; callers pass this handle around.
#[derive(Clone)]
pub struct DataAccess {
    pool: SqlitePool,
}

impl DataAccess {
    /// Creates a data-access context over a unique shared in-memory
    /// database, with the default pool configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::new_in_memory_with_config(&PoolConfig::default())
    }

    /// Creates an in-memory data-access context with an explicit pool
    /// configuration.
    ///
    /// Uses a named shared-cache database so every pooled connection
    /// sees the same data; the pool's kept connections hold the
    /// database alive.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory_with_config(config: &PoolConfig) -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let database_url = format!("file:vitae_mem_{db_id}?mode=memory&cache=shared");
        Self::build(&database_url, config, false)
    }

    /// Creates a data-access context over a file-based database, with
    /// the default pool configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        Self::new_with_file_and_config(path, &PoolConfig::default())
    }

    /// Creates a file-based data-access context with an explicit pool
    /// configuration. Enables WAL mode for read concurrency across the
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file_and_config<P: AsRef<Path>>(
        path: P,
        config: &PoolConfig,
    ) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::DatabaseConnectionFailed(String::from("Invalid database path"))
        })?;
        Self::build(path_str, config, true)
    }

    fn build(
        database_url: &str,
        config: &PoolConfig,
        wal_mode: bool,
    ) -> Result<Self, PersistenceError> {
        let max_size = (config.pool_size + config.max_overflow).max(1);
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .min_idle(Some(config.pool_size.min(max_size)))
            .connection_timeout(config.wait_timeout)
            .connection_customizer(Box::new(backend::ConnectionSetup))
            .build(manager)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        let mut conn = pool
            .get()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        if wal_mode {
            backend::enable_wal_mode(&mut conn)?;
        }
        backend::run_migrations(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;
        drop(conn);

        Ok(Self { pool })
    }

    /// Executes `op` inside a unit of work.
    ///
    /// Acquires one pooled connection, begins a transaction, and runs
    /// `op`. Commits if `op` returns `Ok`, rolls back and propagates
    /// the error otherwise. Either way the unit of work is closed
    /// afterwards and any lazy handles created inside it detach.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::PoolExhausted`] if no connection
    /// frees up within the configured wait, or whatever error `op`
    /// (or commit) produced.
    pub fn with_unit_of_work<T>(
        &self,
        op: impl FnOnce(&UnitOfWork) -> Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| PersistenceError::PoolExhausted(e.to_string()))?;

        AnsiTransactionManager::begin_transaction(&mut *conn)?;
        let ctx = Arc::new(SessionCtx {
            conn: Mutex::new(Some(conn)),
        });
        let unit_of_work = UnitOfWork {
            ctx: Arc::clone(&ctx),
        };

        let result = op(&unit_of_work);

        // Close the unit of work: take the connection out so lazy
        // handles detach, then resolve the transaction.
        let mut guard = ctx
            .conn
            .lock()
            .map_err(|_| PersistenceError::QueryFailed(String::from("session mutex poisoned")))?;
        let Some(mut conn) = guard.take() else {
            return Err(PersistenceError::QueryFailed(String::from(
                "unit of work lost its connection",
            )));
        };

        match result {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(&mut *conn)?;
                debug!("Unit of work committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = AnsiTransactionManager::rollback_transaction(&mut *conn)
                {
                    warn!("Rollback failed after unit-of-work error: {rollback_err}");
                }
                debug!("Unit of work rolled back");
                Err(err)
            }
        }
    }

    /// Executes `op` inside a unit of work on a blocking thread.
    ///
    /// Identical data semantics to [`Self::with_unit_of_work`]; the
    /// request yields the async executor while the database round-trips
    /// run. Statement order within the unit of work is preserved (one
    /// connection, sequential execution).
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::with_unit_of_work`].
    pub async fn with_unit_of_work_async<T, F>(&self, op: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&UnitOfWork) -> Result<T, PersistenceError> + Send + 'static,
        T: Send + 'static,
    {
        let access = self.clone();
        tokio::task::spawn_blocking(move || access.with_unit_of_work(op))
            .await
            .map_err(|e| PersistenceError::QueryFailed(format!("Blocking task failed: {e}")))?
    }
}
