//! Database layer - connection pool and record stores
//!
//! # Design Principles
//!
//! - Pool is built once at startup and injected, never a global
//! - One parameterized statement per operation
//! - Integrity is left to the table schema

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
