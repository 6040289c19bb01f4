//! relctl-store: relational schemas and repositories
//!
//! Three independent schemas share one SQLite database:
//! - `roster`: guests, events and the role-carrying join between them
//! - `projects`: projects owning tasks, tasks linked to employees
//! - `library`: books with an author and a genre, plus analytics queries
//!
//! # Design Principles
//!
//! - Repositories borrow the pool per call - no ambient session
//! - Relationship work (joins, grouping, set operations, cascades) stays in SQL
//! - Multi-statement writes run in a transaction

pub mod error;
pub mod library;
pub mod pagination;
pub mod pool;
pub mod projects;
pub mod roster;

pub use error::{DbError, DbResult};
pub use pagination::{Paginated, Pagination};
pub use pool::{create_memory_pool, create_pool, create_pool_with_options, MEMORY_URL};
