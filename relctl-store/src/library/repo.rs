//! Library repository: aggregates, set operations, ordering and paging
//!
//! Every query here is read-only and assumes referential integrity.

use sqlx::{FromRow, Row, SqlitePool};

use super::models::{Book, BookDetails, Price};
use crate::{DbResult, Paginated, Pagination};

/// Library repository
pub struct LibraryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LibraryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of books whose genre is named exactly `genre`.
    pub async fn count_in_genre(&self, genre: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM books b
            JOIN genres g ON g.id = b.genre_id
            WHERE g.name = ?
            "#,
        )
        .bind(genre)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    /// Cheapest book by the author, `None` when they have no books.
    pub async fn min_price_by_author(&self, author_id: i64) -> DbResult<Option<Price>> {
        let cents: Option<i64> =
            sqlx::query_scalar("SELECT MIN(price_cents) FROM books WHERE author_id = ?")
                .bind(author_id)
                .fetch_one(self.pool)
                .await?;
        Ok(cents.map(Price::from_stored_cents))
    }

    /// Mean price within the named genre, rounded to the cent.
    pub async fn average_price_in_genre(&self, genre: &str) -> DbResult<Option<Price>> {
        let cents: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(b.price_cents)
            FROM books b
            JOIN genres g ON g.id = b.genre_id
            WHERE g.name = ?
            "#,
        )
        .bind(genre)
        .fetch_one(self.pool)
        .await?;
        Ok(cents.map(Price::from_fractional_cents))
    }

    /// Sum of the author's book prices; zero when they have none.
    pub async fn total_price_by_author(&self, author_id: i64) -> DbResult<Price> {
        let cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(price_cents), 0) FROM books WHERE author_id = ?",
        )
        .bind(author_id)
        .fetch_one(self.pool)
        .await?;
        Ok(Price::from_stored_cents(cents))
    }

    /// Every book with author and genre names, ordered by genre name then id.
    pub async fn ordered_by_genre(&self) -> DbResult<Vec<BookDetails>> {
        let books = sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT
                b.id,
                b.title,
                b.price_cents,
                b.author_id,
                b.genre_id,
                a.first_name || ' ' || a.last_name AS author_name,
                g.name AS genre_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            JOIN genres g ON g.id = b.genre_id
            ORDER BY g.name, b.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(books)
    }

    pub async fn titles_in_genre(&self, genre_id: i64) -> DbResult<Vec<String>> {
        let titles: Vec<String> =
            sqlx::query_scalar("SELECT title FROM books WHERE genre_id = ? ORDER BY id")
                .bind(genre_id)
                .fetch_all(self.pool)
                .await?;
        Ok(titles)
    }

    /// All books minus those in the genre.
    pub async fn excluding_genre(&self, genre_id: i64) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, price_cents, author_id, genre_id FROM books
            EXCEPT
            SELECT id, title, price_cents, author_id, genre_id FROM books WHERE genre_id = ?
            ORDER BY id
            "#,
        )
        .bind(genre_id)
        .fetch_all(self.pool)
        .await?;
        Ok(books)
    }

    /// Books by either author, without duplicates.
    pub async fn by_either_author(&self, first: i64, second: i64) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, price_cents, author_id, genre_id FROM books WHERE author_id = ?
            UNION
            SELECT id, title, price_cents, author_id, genre_id FROM books WHERE author_id = ?
            ORDER BY id
            "#,
        )
        .bind(first)
        .bind(second)
        .fetch_all(self.pool)
        .await?;
        Ok(books)
    }

    /// The `limit` priciest books; equal prices keep id order.
    pub async fn most_expensive(&self, limit: u32) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, price_cents, author_id, genre_id
            FROM books
            ORDER BY price_cents DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;
        Ok(books)
    }

    /// One page of books in id order.
    pub async fn page(&self, page: Pagination) -> DbResult<Paginated<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                title,
                price_cents,
                author_id,
                genre_id,
                COUNT(*) OVER() AS total
            FROM books
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        // Past the last page there is no row to carry the window total.
        let total = match rows.first() {
            Some(row) => row.try_get::<i64, _>("total")?,
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
                    .fetch_one(self.pool)
                    .await?
            }
        };
        let items = rows
            .iter()
            .map(Book::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            page: page.page(),
            per_page: page.limit(),
        })
    }
}
