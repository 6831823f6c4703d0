pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

pub use config::StoreConfig;
pub use domain::Client;
pub use error::AppError;
