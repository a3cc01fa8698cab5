use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::MigrationHarness;

use crate::domain::errors::DomainError;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub pool_size: u32,
    pub connection_timeout: Duration,
}

/// Handle to the Postgres pool.
///
/// Repositories take one connection per call through [`Storage::connection`];
/// the returned guard hands the connection back to the pool when it is
/// dropped, whichever way the call exits.
#[derive(Clone)]
pub struct Storage {
    pool: DbPool,
}

impl Storage {
    pub fn open(settings: &DatabaseSettings) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<PgConnection>::new(&settings.url);
        let pool = Pool::builder()
            .max_size(settings.pool_size)
            .connection_timeout(settings.connection_timeout)
            .build(manager)?;
        log::info!(
            "Opened database pool (max {} connections)",
            settings.pool_size
        );
        Ok(Self { pool })
    }

    pub fn connection(&self) -> Result<DbConnection, DomainError> {
        Ok(self.pool.get()?)
    }

    /// Run any pending Diesel migrations.
    pub fn run_migrations(&self) -> Result<(), DomainError> {
        let mut conn = self.connection()?;
        conn.run_pending_migrations(crate::MIGRATIONS)
            .map_err(|e| DomainError::Internal(format!("migrations failed: {e}")))?;
        Ok(())
    }

    /// Release this handle. The pool shuts down once the last clone is gone.
    pub fn close(self) {
        let state = self.pool.state();
        log::info!(
            "Closing database pool ({} connections, {} idle)",
            state.connections,
            state.idle_connections
        );
    }
}
