//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the room ledger using SQLx:
//!
//! - [`pool`]: connection pool and embedded migrations
//! - [`repositories`]: row-level queries
//! - [`adapters`]: [`PostgresLedgerAdapter`], the `LedgerPort` implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresLedgerAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/room_ledger")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresLedgerAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use adapters::PostgresLedgerAdapter;
