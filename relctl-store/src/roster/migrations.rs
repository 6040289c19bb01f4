//! Roster schema

use sqlx::SqlitePool;

use crate::DbResult;

/// Create roster tables and indexes if they do not exist.
pub async fn run(pool: &SqlitePool) -> DbResult<()> {
    tracing::debug!("Running roster migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS guests (
            id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            age INTEGER NOT NULL,
            email TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Removing a guest or an event takes its role rows with it.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS guest_roles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            guest_id INTEGER NOT NULL REFERENCES guests(id) ON DELETE CASCADE,
            event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            role INTEGER NOT NULL CHECK (role BETWEEN 0 AND 6)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_guest_roles_guest ON guest_roles(guest_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_guest_roles_event ON guest_roles(event_id)")
        .execute(pool)
        .await?;

    tracing::debug!("Roster migrations complete");
    Ok(())
}

/// Drop every roster table, then recreate them empty.
pub async fn reset(pool: &SqlitePool) -> DbResult<()> {
    tracing::info!("Resetting roster schema");

    let mut tx = pool.begin().await?;
    for table in ["guest_roles", "events", "guests"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    run(pool).await
}
