use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::errors::ServerError;

// Thread-local connection slot, remembered together with the path it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(String, Connection)>> = const { RefCell::new(None) };
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> Result<Connection, ServerError> {
        debug!("Opening SQLite connection to {}", self.path);
        let conn = Connection::open(&self.path)
            .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| ServerError::DbError(format!("Set busy timeout failed: {e}")))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
        Ok(conn)
    }

    /// Provides this worker thread's connection to the closure, opening it on first use.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();

                let stale = slot.as_ref().map_or(true, |(path, _)| *path != self.path);
                if stale {
                    *slot = Some((self.path.clone(), self.open()?));
                }

                let Some((_, conn)) = slot.as_mut() else {
                    return Err(ServerError::InternalError);
                };
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

/// Initialize database from a SQL schema file
#[instrument(skip(db))]
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("Failed to read schema file: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    info!("Database {} initialized from {}", db.path(), schema_path);
    Ok(())
}
