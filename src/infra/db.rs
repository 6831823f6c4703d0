//! SQLite connection and migrations.

use crate::error::AppError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct DbPool(pub Mutex<Connection>);

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

/// Open the database file at path and bring its schema up to date.
/// Dropping the returned connection closes the file.
pub fn open_connection(db_path: &Path) -> Result<Connection, AppError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut conn = Connection::open(db_path)?;
    run_migrations(&mut conn)?;
    Ok(conn)
}

/// Initialize DB at path, run migrations, return managed pool.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    log::info!("Opening client store at {:?}", db_path);
    let conn = open_connection(db_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;
    Ok(DbPool(Mutex::new(conn)))
}

/// In-memory database with the schema applied, one per call.
pub fn init_test_db() -> Result<DbPool, AppError> {
    let mut conn = Connection::open_in_memory()?;
    run_migrations(&mut conn)?;
    Ok(DbPool(Mutex::new(conn)))
}

pub fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // The version row is recorded below, not by the script.
        let statements = sql
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("Applied migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

/// Get connection from pool.
pub fn get_connection(pool: &DbPool) -> Result<MutexGuard<'_, Connection>, AppError> {
    pool.0
        .lock()
        .map_err(|e| AppError::Storage(format!("db lock poisoned: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn applied_versions(conn: &Connection) -> Vec<i32> {
        conn.prepare("SELECT version FROM schema_migrations ORDER BY version")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_db_has_clients_table() {
        let pool = init_test_db().unwrap();
        let conn = get_connection(&pool).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'clients'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(applied_versions(&conn), vec![1]);
    }

    #[test]
    fn poisoned_lock_is_storage_error() {
        let pool = Arc::new(init_test_db().unwrap());
        let held = Arc::clone(&pool);
        let joined = thread::spawn(move || {
            let _guard = held.0.lock().unwrap();
            panic!("panic while holding the db lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(pool.0.is_poisoned());

        let err = get_connection(&pool).err().unwrap();
        assert_eq!(err.code(), "STORAGE_ERROR");
        assert!(!err.is_not_found());
    }

    #[test]
    fn migrations_are_applied_once() {
        let pool = init_test_db().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();
        assert_eq!(applied_versions(&conn), vec![1]);
    }
}
