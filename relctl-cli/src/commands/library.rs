//! Library commands - aggregate, set and paging queries over books
//!
//! ```bash
//! relctl library count-genre Fantasy
//! relctl library page --page 3 --per-page 5 --json | jq '.items[].title'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relctl_store::library::{self, Book, BookDetails, LibraryRepo, Price, SeedReport};
use relctl_store::{Paginated, Pagination};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::output::{emit, print_list, OutputFormat};

#[derive(Parser, Debug)]
pub struct LibraryArgs {
    #[command(subcommand)]
    pub command: LibraryCommands,
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// Seed every empty library table
    Seed,
    /// Drop, recreate and reseed the library tables
    Reset,
    /// Count books in a genre
    CountGenre(GenreNameArg),
    /// Cheapest book price for an author
    MinPrice(AuthorIdArg),
    /// Average book price in a genre
    AvgPrice(GenreNameArg),
    /// Total price of an author's books
    SumPrice(AuthorIdArg),
    /// All books ordered by genre name
    ByGenre,
    /// Book titles in a genre
    Titles(GenreIdArg),
    /// All books except those in a genre
    ExceptGenre(GenreIdArg),
    /// Books by either of two authors
    UnionAuthors(UnionArgs),
    /// Most expensive books
    Top(TopArgs),
    /// One page of books ordered by ID
    Page(PageArgs),
    /// Run every library query with the demo parameters
    Demo,
}

#[derive(Parser, Debug)]
pub struct GenreNameArg {
    /// Genre name (exact)
    pub genre: String,
}

#[derive(Parser, Debug)]
pub struct GenreIdArg {
    /// Genre ID
    pub genre_id: i64,
}

#[derive(Parser, Debug)]
pub struct AuthorIdArg {
    /// Author ID
    pub author_id: i64,
}

#[derive(Parser, Debug)]
pub struct UnionArgs {
    /// First author ID
    pub first: i64,
    /// Second author ID
    pub second: i64,
}

#[derive(Parser, Debug)]
pub struct TopArgs {
    /// Number of books to show
    #[arg(long, short, default_value = "5")]
    pub limit: u32,
}

#[derive(Parser, Debug)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,
    /// Books per page (max 100)
    #[arg(long, default_value = "5")]
    pub per_page: u32,
}

pub async fn run_library(args: LibraryArgs, pool: &SqlitePool, format: OutputFormat) -> Result<()> {
    let report = match args.command {
        LibraryCommands::Reset => library::reset(pool).await.context("Failed to reset library schema")?,
        _ => library::prepare(pool).await.context("Failed to prepare library schema")?,
    };
    let repo = LibraryRepo::new(pool);

    match args.command {
        LibraryCommands::Seed | LibraryCommands::Reset => {
            emit(format, &report, print_report)?;
        }
        LibraryCommands::CountGenre(a) => {
            let count = repo.count_in_genre(&a.genre).await?;
            emit(format, &count, |c| println!("{} books: {c}", a.genre))?;
        }
        LibraryCommands::MinPrice(a) => {
            let price = repo.min_price_by_author(a.author_id).await?;
            emit(format, &price, |p| {
                println!("Cheapest book by author {}: {}", a.author_id, show_price(*p))
            })?;
        }
        LibraryCommands::AvgPrice(a) => {
            let price = repo.average_price_in_genre(&a.genre).await?;
            emit(format, &price, |p| {
                println!("Average price in {}: {}", a.genre, show_price(*p))
            })?;
        }
        LibraryCommands::SumPrice(a) => {
            let total = repo.total_price_by_author(a.author_id).await?;
            emit(format, &total, |t| {
                println!("Total price of books by author {}: {t}", a.author_id)
            })?;
        }
        LibraryCommands::ByGenre => {
            let books = repo.ordered_by_genre().await?;
            emit(format, &books, |b| print_details("Books by genre", b))?;
        }
        LibraryCommands::Titles(a) => {
            let titles = repo.titles_in_genre(a.genre_id).await?;
            emit(format, &titles, |t| {
                print_list(&format!("Titles in genre {}", a.genre_id), t, String::clone)
            })?;
        }
        LibraryCommands::ExceptGenre(a) => {
            let books = repo.excluding_genre(a.genre_id).await?;
            emit(format, &books, |b| {
                print_books(&format!("Books outside genre {}", a.genre_id), b)
            })?;
        }
        LibraryCommands::UnionAuthors(a) => {
            let books = repo.by_either_author(a.first, a.second).await?;
            emit(format, &books, |b| {
                print_books(&format!("Books by author {} or {}", a.first, a.second), b)
            })?;
        }
        LibraryCommands::Top(a) => {
            let books = repo.most_expensive(a.limit).await?;
            emit(format, &books, |b| print_books("Most expensive books", b))?;
        }
        LibraryCommands::Page(a) => {
            let page = repo.page(Pagination::new(a.page, a.per_page)).await?;
            emit(format, &page, print_page)?;
        }
        LibraryCommands::Demo => run_demo(&repo, report, format).await?,
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct LibraryDemo {
    seeded: SeedReport,
    fantasy_count: i64,
    min_price_author_3: Option<Price>,
    avg_price_horror: Option<Price>,
    sum_price_author_4: Price,
    ordered_by_genre: Vec<BookDetails>,
    titles_in_genre_1: Vec<String>,
    except_genre_2: Vec<Book>,
    union_authors_1_2: Vec<Book>,
    top_5: Vec<Book>,
    skip_10_take_5: Paginated<Book>,
}

async fn run_demo(repo: &LibraryRepo<'_>, seeded: SeedReport, format: OutputFormat) -> Result<()> {
    let demo = LibraryDemo {
        seeded,
        fantasy_count: repo.count_in_genre("Fantasy").await?,
        min_price_author_3: repo.min_price_by_author(3).await?,
        avg_price_horror: repo.average_price_in_genre("Horror").await?,
        sum_price_author_4: repo.total_price_by_author(4).await?,
        ordered_by_genre: repo.ordered_by_genre().await?,
        titles_in_genre_1: repo.titles_in_genre(1).await?,
        except_genre_2: repo.excluding_genre(2).await?,
        union_authors_1_2: repo.by_either_author(1, 2).await?,
        top_5: repo.most_expensive(5).await?,
        skip_10_take_5: repo.page(Pagination::new(3, 5)).await?,
    };

    emit(format, &demo, |d| {
        print_report(&d.seeded);
        println!("┌─ Aggregates");
        println!("│  Fantasy books: {}", d.fantasy_count);
        println!("│  Cheapest by author 3: {}", show_price(d.min_price_author_3));
        println!("│  Average Horror price: {}", show_price(d.avg_price_horror));
        println!("│  Total by author 4: {}", d.sum_price_author_4);
        print_details("Books by genre", &d.ordered_by_genre);
        print_list("Titles in genre 1", &d.titles_in_genre_1, String::clone);
        print_books("Books outside genre 2", &d.except_genre_2);
        print_books("Books by author 1 or 2", &d.union_authors_1_2);
        print_books("Most expensive books", &d.top_5);
        print_page(&d.skip_10_take_5);
    })
}

fn show_price(price: Option<Price>) -> String {
    price.map_or_else(|| "n/a".to_string(), |p| p.to_string())
}

fn print_report(report: &SeedReport) {
    if report.is_empty() {
        println!("Library already seeded");
    } else {
        println!(
            "✓ Seeded {} genres, {} authors, {} books",
            report.genres, report.authors, report.books
        );
    }
}

fn print_books(title: &str, books: &[Book]) {
    print_list(title, books, |b| format!("#{} {} {}", b.id, b.title, b.price));
}

fn print_details(title: &str, books: &[BookDetails]) {
    print_list(title, books, |b| {
        format!(
            "{} | #{} {} by {} {}",
            b.genre_name, b.book.id, b.book.title, b.author_name, b.book.price
        )
    });
}

fn print_page(page: &Paginated<Book>) {
    print_books(
        &format!(
            "Page {}/{} ({} books total)",
            page.page,
            page.total_pages(),
            page.total
        ),
        &page.items,
    );
    if page.has_next() {
        println!("   next: --page {}", page.page + 1);
    }
}
