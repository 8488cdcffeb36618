#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate log;

use std::env;

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use r2d2::Error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type Connection = PooledConnection<ConnectionManager<SqliteConnection>>;
pub mod models;
pub mod schema;

const DEFAULT_DATABASE_URL: &str = "db.sqlite3";
const DEFAULT_POOL_SIZE: u32 = 10;

embed_migrations!("migrations");

pub fn get_conn(pool: &DbPool) -> Result<Connection, Error> {
    pool.get().map_err(|err| {
        error!("Failed to get connection - {}", err.to_string());
        err
    })
}

pub fn database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Pool over the database named by `DATABASE_URL`.
pub fn new_pool() -> Result<DbPool, Error> {
    pool_from_url(&database_url(), DEFAULT_POOL_SIZE)
}

/// `:memory:` databases live as long as their connection, so callers using one
/// should pass a `max_size` of 1 to keep every checkout on the same database.
pub fn pool_from_url(database_url: &str, max_size: u32) -> Result<DbPool, Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|err| {
            error!("Failed to create db pool - {}", err.to_string());
            err
        })
}

/// Runs every migration under `db/migrations` that this database hasn't
/// recorded yet.
pub fn run_migrations(conn: &SqliteConnection) -> Result<(), errors::Error> {
    embedded_migrations::run(conn).map_err(|err| {
        error!("Failed to run migrations - {}", err.to_string());
        errors::Error::InternalServerError("Failed to run migrations".into())
    })?;
    debug!("Schema is up to date");

    Ok(())
}

/// Fresh in-memory database with the schema applied. The pool holds a single
/// connection since every `:memory:` connection is its own database.
pub fn memory_pool() -> Result<DbPool, errors::Error> {
    let pool = pool_from_url(":memory:", 1)?;
    let conn = get_conn(&pool)?;
    run_migrations(&conn)?;
    drop(conn);

    Ok(pool)
}
