//! Application use cases.

mod client;

pub use client::{client_delete, client_get, client_insert};
