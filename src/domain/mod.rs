//! Domain types.

mod client;

pub use client::{Client, BIRTHDAY_FORMAT};
