//! Projects owning tasks, tasks linked many-to-many to employees
//!
//! Deleting a project cascades to its tasks and from there to the
//! `employee_tasks` join rows.

pub mod migrations;
pub mod models;
pub mod repo;
pub mod seed;

pub use models::{Employee, Position, Project, ProjectWithTasks, Status, Task, TaskWithEmployees};
pub use repo::ProjectRepo;

use sqlx::SqlitePool;

use crate::DbResult;

/// Create the project tables if needed and seed them when empty.
pub async fn prepare(pool: &SqlitePool) -> DbResult<()> {
    migrations::run(pool).await?;
    seed::seed_if_empty(pool).await?;
    Ok(())
}

/// Drop, recreate and reseed the project tables.
pub async fn reset(pool: &SqlitePool) -> DbResult<()> {
    migrations::reset(pool).await?;
    seed::seed_if_empty(pool).await?;
    Ok(())
}
