//! Infrastructure: SQLite connection and migrations.

pub mod db;

pub use db::{get_connection, init_db, open_connection, DbPool};
