//! Project schema

use sqlx::SqlitePool;

use crate::DbResult;

/// Create project tables and indexes if they do not exist.
pub async fn run(pool: &SqlitePool) -> DbResult<()> {
    tracing::debug!("Running project migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            deadline TEXT NOT NULL,
            status INTEGER NOT NULL CHECK (status BETWEEN 0 AND 2),
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            age INTEGER NOT NULL,
            position INTEGER NOT NULL CHECK (position BETWEEN 0 AND 2)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employee_tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
            employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            UNIQUE (task_id, employee_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_employee_tasks_employee ON employee_tasks(employee_id)",
    )
    .execute(pool)
    .await?;

    tracing::debug!("Project migrations complete");
    Ok(())
}

/// Drop every project table, then recreate them empty.
pub async fn reset(pool: &SqlitePool) -> DbResult<()> {
    tracing::info!("Resetting project schema");

    let mut tx = pool.begin().await?;
    for table in ["employee_tasks", "tasks", "employees", "projects"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    run(pool).await
}
