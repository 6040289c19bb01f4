//! Books, authors and genres with read-only analytics
//!
//! Seeding is guarded per table: a table is filled only when it is empty.

pub mod migrations;
pub mod models;
pub mod repo;
pub mod seed;

pub use models::{Author, Book, BookDetails, Genre, Price};
pub use repo::LibraryRepo;
pub use seed::SeedReport;

use sqlx::SqlitePool;

use crate::DbResult;

/// Create the library tables if needed and fill the empty ones.
pub async fn prepare(pool: &SqlitePool) -> DbResult<SeedReport> {
    migrations::run(pool).await?;
    seed::seed_if_empty(pool).await
}

/// Drop, recreate and reseed the library tables.
pub async fn reset(pool: &SqlitePool) -> DbResult<SeedReport> {
    migrations::reset(pool).await?;
    seed::seed_if_empty(pool).await
}
