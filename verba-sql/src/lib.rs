//! # Verba SQL
//!
//! Database table message store for Verba, built on SQLx.
//!
//! Messages live in a single table with one row per basename, locale and
//! key. Table and column names, identifier quoting and the placeholder
//! syntax are configurable through [`TableConfig`].
//!
//! ## Features
//!
//! - **Multiple Backends**: SQLite, PostgreSQL and MySQL through the SQLx
//!   `Any` driver
//! - **Transactional Writes**: replacing a basename deletes and inserts in
//!   one transaction
//! - **Configurable Layout**: serde-friendly table configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verba_core::MessageSource;
//! use verba_sql::{DatabaseConfig, TableConfig, TableMessageProvider, connect};
//!
//! let pool = connect(&DatabaseConfig::new("sqlite:messages.db")).await?;
//! let store = TableMessageProvider::new(pool, TableConfig::default())?;
//!
//! let source = MessageSource::builder().provider(store).build()?;
//! source.load().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod database;
mod error;
mod provider;
mod query;

pub use config::*;
pub use database::*;
pub use error::*;
pub use provider::TableMessageProvider;
pub use query::Statements;

// Re-export sqlx for callers building their own pools
pub use sqlx;

/// Prelude module for commonly used types.
pub mod prelude {
    pub use super::{DatabaseConfig, PlaceholderStyle, SqlError, SqlResult, TableConfig, TableMessageProvider};
    pub use super::{connect, connect_from_env};
}
