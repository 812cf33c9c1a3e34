mod deal_filter;
mod from_row;
mod schema;
mod seed;
pub mod queries;

pub use deal_filter::{DealFilter, FilterQuery, MAX_YEAR, MIN_YEAR};
pub use from_row::{
    AccountRecord, DealRecord, FromRow, MappingError, OrganizationRecord, query_all, query_one,
};
pub use schema::{enable_foreign_keys, init_db};
pub use seed::{SeedSummary, seed_fixtures};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The only storage handle; query functions receive a connection from it
    /// explicitly.
    pub db: DbPool,
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager =
        SqliteConnectionManager::file(database_path).with_init(|conn| enable_foreign_keys(conn));
    Pool::builder().max_size(10).build(manager)
}

/// Single-connection pool over a private in-memory database.
///
/// Each in-memory connection is its own database, so the pool is capped at one.
pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| enable_foreign_keys(conn));
    Pool::builder().max_size(1).build(manager)
}
