use diesel::prelude::*;
use thiserror::Error;
use crate::db::{contributor::models::*, schema::contributors::dsl::*};

#[derive(Debug, Error)]
pub enum InsertContributorError {
    #[error("InsertContributor: {source}")]
    InsertContributor {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_contributor(
    conn: &mut PgConnection,
    new: &NewContributor,
) -> Result<Contributor, InsertContributorError> {
    diesel::insert_into(contributors)
        .values(new)
        .get_result(conn)
        .map_err(|source| InsertContributorError::InsertContributor { source })
}

#[derive(Debug, Error)]
pub enum GetContributorByUsernameError {
    #[error("GetContributorByUsername: {source}")]
    GetContributorByUsername {
        #[from]
        source: diesel::result::Error,
    },
}

/// Earliest stored row for the triple. Duplicates from repeated ingestion
/// are expected; the first one written wins.
pub fn get_contributor_by_username(
    conn: &mut PgConnection,
    owner_val: &str,
    repo_val: &str,
    username_val: &str,
) -> Result<Option<Contributor>, GetContributorByUsernameError> {
    contributors
        .filter(owner.eq(owner_val))
        .filter(repo.eq(repo_val))
        .filter(username.eq(username_val))
        .order(created_at.asc())
        .first::<Contributor>(conn)
        .optional()
        .map_err(|source| GetContributorByUsernameError::GetContributorByUsername { source })
}
