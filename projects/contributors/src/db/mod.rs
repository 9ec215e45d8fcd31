pub mod schema;
pub mod contributor;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use thiserror::Error;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum BuildPoolError {
    #[error("BuildPool: {source}")]
    BuildPool {
        #[source]
        source: r2d2::Error,
    },
}

/// Connects eagerly so an unreachable database fails start-up.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, BuildPoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|source| BuildPoolError::BuildPool { source })
}
