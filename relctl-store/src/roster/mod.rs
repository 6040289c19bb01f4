//! Guests, events and the role-carrying join between them
//!
//! `guest_roles` is a first-class join table with its own key. The same
//! guest/event pair may appear more than once; nothing enforces uniqueness.

pub mod migrations;
pub mod models;
pub mod repo;
pub mod seed;

pub use models::{Event, Guest, GuestRole, Role, TopGuest};
pub use repo::RosterRepo;

use sqlx::SqlitePool;

use crate::DbResult;

/// Create the roster tables if needed and seed them when empty.
pub async fn prepare(pool: &SqlitePool) -> DbResult<()> {
    migrations::run(pool).await?;
    seed::seed_if_empty(pool).await?;
    Ok(())
}

/// Drop, recreate and reseed the roster tables.
pub async fn reset(pool: &SqlitePool) -> DbResult<()> {
    migrations::reset(pool).await?;
    seed::seed_if_empty(pool).await?;
    Ok(())
}
