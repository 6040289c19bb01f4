//! Library schema

use sqlx::SqlitePool;

use crate::DbResult;

/// Create library tables and indexes if they do not exist.
pub async fn run(pool: &SqlitePool) -> DbResult<()> {
    tracing::debug!("Running library migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT NOT NULL,
            death_date TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
            author_id INTEGER NOT NULL REFERENCES authors(id),
            genre_id INTEGER NOT NULL REFERENCES genres(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_genre ON books(genre_id)")
        .execute(pool)
        .await?;

    tracing::debug!("Library migrations complete");
    Ok(())
}

/// Drop every library table, then recreate them empty.
pub async fn reset(pool: &SqlitePool) -> DbResult<()> {
    tracing::info!("Resetting library schema");

    let mut tx = pool.begin().await?;
    for table in ["books", "authors", "genres"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    run(pool).await
}
