//! Connection lifecycle for the vocabulary store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Lazily create the directory that holds the store file.
//! - Trigger schema migrations before returning a usable connection.
//! - Close connections explicitly so close failures are observable.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - Opening the same file repeatedly is idempotent.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the vocabulary store file and applies all pending migrations.
///
/// Missing parent directories are created on first use.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let result = ensure_parent_dir(path)
        .and_then(|()| Connection::open(path).map_err(DbError::from))
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));
    log_open_outcome("file", started_at, result)
}

/// Opens a private in-memory store with the full schema applied.
///
/// Every call returns an isolated database, which is what tests rely on.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));
    log_open_outcome("memory", started_at, result)
}

/// Closes a store connection, surfacing any error SQLite reports on close.
pub fn close_db(conn: Connection) -> DbResult<()> {
    match conn.close() {
        Ok(()) => {
            info!("event=db_close module=db status=ok");
            Ok(())
        }
        Err((_conn, err)) => {
            warn!("event=db_close module=db status=error error={err}");
            Err(err.into())
        }
    }
}

fn ensure_parent_dir(path: &Path) -> DbResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

fn log_open_outcome(
    mode: &str,
    started_at: Instant,
    result: DbResult<Connection>,
) -> DbResult<Connection> {
    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={err}",
            started_at.elapsed().as_millis(),
            open_error_code(err)
        ),
    }
    result
}

fn open_error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Io(_) => "db_dir_failed",
        DbError::Sqlite(_) => "db_open_failed",
        DbError::UnsupportedSchemaVersion { .. } => "db_bootstrap_failed",
    }
}
