//! `PostgreSQL` local stores for the Sabor Digital services.
//!
//! A single generic [`PgRepository`] implements the core `Repository` trait
//! for every aggregate; each aggregate describes its table through
//! [`PgMapping`].

pub mod mappings;
pub mod pg_repository;

pub use pg_repository::{ChildTable, PgMapping, PgRepository};

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

/// Schema migrations for every service.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a connection pool.
///
/// # Errors
///
/// Returns the driver error if the database cannot be reached.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
