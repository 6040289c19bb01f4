//! Library seed rows
//!
//! Rows are inserted without explicit ids; on empty tables they receive ids
//! 1.. in listing order, which the book rows rely on.

use serde::Serialize;
use sqlx::SqlitePool;

use super::models::Price;
use crate::DbResult;

const GENRES: &[(&str, &str)] = &[
    (
        "Science Fiction",
        "Fiction dealing with futuristic concepts and technologies.",
    ),
    ("Fantasy", "Fiction set in magical or imaginary worlds."),
    (
        "Historical",
        "Fiction set in a historical period, featuring real or imaginary events.",
    ),
    (
        "Mystery",
        "Fiction dealing with solving a crime or uncovering secrets.",
    ),
    (
        "Horror",
        "Fiction intended to scare, unsettle, or horrify readers.",
    ),
];

/// (first name, last name, birth date, death date)
const AUTHORS: &[(&str, &str, &str, Option<&str>)] = &[
    ("Isaac", "Asimov", "1920-01-02", Some("1992-04-06")),
    ("J.R.R.", "Tolkien", "1892-01-03", Some("1973-09-02")),
    ("Ken", "Follett", "1949-06-05", None),
    ("Agatha", "Christie", "1890-09-15", Some("1976-01-12")),
    ("Stephen", "King", "1947-09-21", None),
    ("George", "Orwell", "1903-06-25", Some("1950-01-21")),
    ("Frank", "Herbert", "1920-10-08", Some("1986-02-11")),
];

/// (title, price, author, genre)
const BOOKS: &[(&str, Price, i64, i64)] = &[
    ("Foundation", Price::from_cents(999), 1, 1),
    ("The Hobbit", Price::from_cents(1299), 2, 2),
    ("The Pillars of the Earth", Price::from_cents(1599), 3, 3),
    ("Murder on the Orient Express", Price::from_cents(899), 4, 4),
    ("The Shining", Price::from_cents(1099), 5, 5),
    ("1984", Price::from_cents(799), 6, 1),
    ("Dune", Price::from_cents(1499), 7, 1),
    ("The Lord of the Rings", Price::from_cents(1999), 2, 2),
    ("And Then There Were None", Price::from_cents(949), 4, 4),
    ("Carrie", Price::from_cents(799), 5, 5),
    ("The Children of Dune", Price::from_cents(1199), 7, 1),
    ("The Silmarillion", Price::from_cents(1399), 2, 2),
    ("The Winds of Winter", Price::from_cents(1699), 2, 2),
    ("Pillars of Creation", Price::from_cents(1449), 3, 3),
    ("Salem's Lot", Price::from_cents(989), 5, 5),
    ("The Murder of Roger Ackroyd", Price::from_cents(759), 4, 4),
    ("Brave New World", Price::from_cents(1149), 6, 1),
    ("Cujo", Price::from_cents(1079), 5, 5),
    ("The Gunslinger", Price::from_cents(1299), 5, 5),
];

/// Rows inserted by [`seed_if_empty`], per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub genres: usize,
    pub authors: usize,
    pub books: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.genres == 0 && self.authors == 0 && self.books == 0
    }
}

/// Fill each library table that is currently empty.
///
/// Each table is checked and filled in its own transaction.
pub async fn seed_if_empty(pool: &SqlitePool) -> DbResult<SeedReport> {
    let mut report = SeedReport::default();

    let mut tx = pool.begin().await?;
    let genres: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(&mut *tx)
        .await?;
    if genres == 0 {
        for &(name, description) in GENRES {
            sqlx::query("INSERT INTO genres (name, description) VALUES (?, ?)")
                .bind(name)
                .bind(description)
                .execute(&mut *tx)
                .await?;
        }
        report.genres = GENRES.len();
    }
    tx.commit().await?;

    let mut tx = pool.begin().await?;
    let authors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
        .fetch_one(&mut *tx)
        .await?;
    if authors == 0 {
        for &(first_name, last_name, birth_date, death_date) in AUTHORS {
            sqlx::query(
                "INSERT INTO authors (first_name, last_name, birth_date, death_date) VALUES (?, ?, ?, ?)",
            )
            .bind(first_name)
            .bind(last_name)
            .bind(birth_date)
            .bind(death_date)
            .execute(&mut *tx)
            .await?;
        }
        report.authors = AUTHORS.len();
    }
    tx.commit().await?;

    let mut tx = pool.begin().await?;
    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&mut *tx)
        .await?;
    if books == 0 {
        for &(title, price, author_id, genre_id) in BOOKS {
            sqlx::query(
                "INSERT INTO books (title, price_cents, author_id, genre_id) VALUES (?, ?, ?, ?)",
            )
            .bind(title)
            .bind(price)
            .bind(author_id)
            .bind(genre_id)
            .execute(&mut *tx)
            .await?;
        }
        report.books = BOOKS.len();
    }
    tx.commit().await?;

    if report.is_empty() {
        tracing::debug!("Library already seeded");
    } else {
        tracing::info!(
            genres = report.genres,
            authors = report.authors,
            books = report.books,
            "Seeded library"
        );
    }
    Ok(report)
}
