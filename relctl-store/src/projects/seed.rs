//! Fixed project seed rows

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use super::models::{Position, Status};
use crate::DbResult;

const PROJECTS: &[(i64, &str, &str)] = &[
    (1, "Project Alpha", "This is the Alpha project"),
    (2, "Project Beta", "This is the Beta project"),
];

/// (id, title, description, days until deadline, status, project)
const TASKS: &[(i64, &str, &str, i64, Status, i64)] = &[
    (1, "Task A1", "Alpha Task 1", 10, Status::InProgress, 1),
    (2, "Task A2", "Alpha Task 2", 20, Status::Completed, 1),
    (3, "Task B1", "Beta Task 1", 5, Status::InProgress, 2),
    (4, "Task B2", "Beta Task 2", 15, Status::Cancelled, 2),
];

const EMPLOYEES: &[(i64, &str, i64, Position)] = &[
    (1, "John Doe", 28, Position::Middle),
    (2, "Jane Smith", 35, Position::Senior),
    (3, "Alice Johnson", 24, Position::Junior),
];

/// (task, employee)
const ASSIGNMENTS: &[(i64, i64)] = &[(1, 1), (1, 3), (2, 2), (3, 1), (4, 3)];

/// Insert the seed rows when the project table is empty.
///
/// Deadlines are relative to the moment of seeding.
pub async fn seed_if_empty(pool: &SqlitePool) -> DbResult<bool> {
    let mut tx = pool.begin().await?;

    let projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&mut *tx)
        .await?;
    if projects > 0 {
        return Ok(false);
    }

    for &(id, title, description) in PROJECTS {
        sqlx::query("INSERT INTO projects (id, title, description) VALUES (?, ?, ?)")
            .bind(id)
            .bind(title)
            .bind(description)
            .execute(&mut *tx)
            .await?;
    }

    let now = Utc::now();
    for &(id, title, description, days, status, project_id) in TASKS {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, deadline, status, project_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(now + Duration::days(days))
        .bind(status)
        .bind(project_id)
        .execute(&mut *tx)
        .await?;
    }

    for &(id, full_name, age, position) in EMPLOYEES {
        sqlx::query("INSERT INTO employees (id, full_name, age, position) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(full_name)
            .bind(age)
            .bind(position)
            .execute(&mut *tx)
            .await?;
    }

    for &(task_id, employee_id) in ASSIGNMENTS {
        sqlx::query("INSERT INTO employee_tasks (task_id, employee_id) VALUES (?, ?)")
            .bind(task_id)
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    tracing::info!(
        projects = PROJECTS.len(),
        tasks = TASKS.len(),
        employees = EMPLOYEES.len(),
        "Seeded projects"
    );
    Ok(true)
}
