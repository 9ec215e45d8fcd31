use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::db::{
    contributor::{
        models::NewContributor,
        queries::{get_contributor_by_username, insert_contributor},
    },
    PgPool,
};

use super::{ContributorFilter, ContributorRecord, ContributorStore, StoreError};

/// Diesel-backed store. Queries are blocking, so each call hops onto
/// tokio's blocking pool with its own pooled connection.
///
/// `created_at` is stamped here rather than by the column default: `NOW()`
/// is frozen for a whole transaction, which would tie every row inserted
/// inside one.
#[derive(Clone)]
pub struct PgContributorStore {
    pool: PgPool,
}

impl PgContributorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContributorStore for PgContributorStore {
    async fn insert_one(&self, record: ContributorRecord) -> Result<(), StoreError> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut conn = pool.get()?;
            let new = NewContributor::from_record(Uuid::new_v4(), Utc::now().naive_utc(), &record);
            insert_contributor(&mut conn, &new)?;
            Ok(())
        })
        .await?
    }

    async fn find_one(&self, filter: ContributorFilter) -> Result<Option<ContributorRecord>, StoreError> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> Result<Option<ContributorRecord>, StoreError> {
            let mut conn = pool.get()?;
            let row = get_contributor_by_username(
                &mut conn,
                &filter.owner,
                &filter.repo,
                &filter.username,
            )?;
            Ok(row.map(ContributorRecord::from))
        })
        .await?
    }
}
