//! Library records

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// Non-negative currency amount held in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, sqlx::Type)]
#[sqlx(transparent)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u32) -> Self {
        Self(cents as i64)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Wrap a cent amount read back from `books.price_cents`, which the
    /// schema keeps non-negative.
    pub(crate) const fn from_stored_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Round a fractional cent amount (as produced by `AVG`) to a price.
    pub(crate) fn from_fractional_cents(cents: f64) -> Self {
        Self(cents.round().max(0.0) as i64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// `None` while the author is alive.
    pub death_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[sqlx(rename = "price_cents")]
    pub price: Price,
    pub author_id: i64,
    pub genre_id: i64,
}

/// Book with author and genre names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub book: Book,
    pub author_name: String,
    pub genre_name: String,
}
