//! The storage collaborator: an append-only collection of contributor
//! records supporting insert-one and find-one by exact field match.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::contributor::queries::{GetContributorByUsernameError, InsertContributorError};

pub use memory::MemoryContributorStore;
pub use postgres::PgContributorStore;

/// One persisted contributor document. Not unique-keyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorRecord {
    pub owner: String,
    pub repo: String,
    pub username: String,
    pub avatar_url: String,
    pub site_admin: bool,
    pub contributions: i64,
}

/// Case-sensitive equality on all three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorFilter {
    pub owner: String,
    pub repo: String,
    pub username: String,
}

impl ContributorFilter {
    pub fn matches(&self, record: &ContributorRecord) -> bool {
        record.owner == self.owner && record.repo == self.repo && record.username == self.username
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error(transparent)]
    InsertContributor {
        #[from]
        source: InsertContributorError,
    },

    #[error(transparent)]
    GetContributorByUsername {
        #[from]
        source: GetContributorByUsernameError,
    },

    #[error("BlockingTask: {source}")]
    BlockingTask {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("Unavailable: {reason}")]
    Unavailable { reason: String },
}

#[async_trait]
pub trait ContributorStore: Send + Sync {
    async fn insert_one(&self, record: ContributorRecord) -> Result<(), StoreError>;

    /// First matching record in insertion order, if any.
    async fn find_one(&self, filter: ContributorFilter) -> Result<Option<ContributorRecord>, StoreError>;
}
