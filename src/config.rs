//! Where the client database lives.

use crate::error::AppError;
use crate::infra::{init_db, DbPool};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CLIENT_STORE_DB_PATH";
const APP_DIR: &str = "client-store";
const DB_FILE: &str = "clients.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// `CLIENT_STORE_DB_PATH` if set, else the per-user data directory.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(DB_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => Self::new(path),
            None => Self::new(default_db_path()),
        }
    }

    pub fn open(&self) -> Result<DbPool, AppError> {
        init_db(&self.db_path)
    }
}

fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR)
}

pub fn default_db_path() -> PathBuf {
    app_data_dir().join(DB_FILE)
}
