//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! The original open-a-connection-per-call pattern is replaced by one pooled
//! handle owned by [`Database`]; call-level atomicity is preserved because
//! `record_sale` runs inside an explicit transaction. WAL journal mode keeps
//! readers and writers from blocking each other, which also covers the
//! "crash never observes a half-recorded sale" requirement.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use stockbook_core::AdminSeed;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::user::UserRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./inventory.db")
///     .max_connections(5)
///     .bootstrap_admin(Some(AdminSeed::new("admin", "changed-it")));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file. Created if missing.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    pub min_connections: u32,

    /// Connection acquire timeout.
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    pub run_migrations: bool,

    /// Account seeded when the credential store is empty at startup.
    ///
    /// `DbConfig::new` defaults this to [`AdminSeed::default`] - the
    /// documented, publicly known `admin`/`admin123` first-run convenience.
    /// Pass `None` to disable bootstrapping entirely.
    pub bootstrap_admin: Option<AdminSeed>,
}

impl DbConfig {
    /// Creates a configuration with defaults suited to a local desktop tool.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            bootstrap_admin: Some(AdminSeed::default()),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Replaces or disables the bootstrap admin account.
    pub fn bootstrap_admin(mut self, seed: Option<AdminSeed>) -> Self {
        self.bootstrap_admin = seed;
        self
    }

    /// In-memory database for tests: single connection, isolated, no
    /// bootstrap account (tests opt in explicitly).
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires a single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            bootstrap_admin: None,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// The presentation layer holds one `Database` (it is `Clone`, the pool is
/// shared) and reaches every operation through it.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database, runs migrations, and seeds the bootstrap admin
    /// account when the credential store is empty.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // WAL: readers don't block the writer recording a sale
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "database pool created");

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        if let Some(seed) = &config.bootstrap_admin {
            db.bootstrap_admin(seed).await?;
        }

        Ok(db)
    }

    /// Runs pending migrations. Called by `new()` unless disabled.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Creates the seed account if no users exist yet.
    ///
    /// First-run convenience: an empty credential store would otherwise be
    /// impossible to log into. Existing users disable this permanently.
    async fn bootstrap_admin(&self, seed: &AdminSeed) -> DbResult<()> {
        if self.users().count().await? == 0 {
            self.users().register(&seed.username, &seed.password).await?;
            info!(username = %seed.username, "seeded bootstrap admin account");
        }
        Ok(())
    }

    /// Returns a reference to the connection pool for advanced queries.
    /// Prefer the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Credential store operations.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Product catalog operations.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Sales ledger operations.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Reporting queries over catalog and ledger.
    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone())
    }

    /// Closes the pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("closing database connection pool");
        self.pool.close().await;
    }

    /// Checks that the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
