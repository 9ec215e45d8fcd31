use chrono::NaiveDateTime;
use uuid::Uuid;
use diesel::prelude::*;
use crate::db::schema::contributors;
use crate::store::ContributorRecord;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = contributors)]
pub struct Contributor {
    pub id: Uuid,
    pub owner: String,
    pub repo: String,
    pub username: String,
    pub avatar_url: String,
    pub site_admin: bool,
    pub contributions: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contributors)]
pub struct NewContributor<'a> {
    pub id: Uuid,
    pub owner: &'a str,
    pub repo: &'a str,
    pub username: &'a str,
    pub avatar_url: &'a str,
    pub site_admin: bool,
    pub contributions: i64,
    pub created_at: NaiveDateTime,
}

impl<'a> NewContributor<'a> {
    pub fn from_record(id: Uuid, created_at: NaiveDateTime, record: &'a ContributorRecord) -> Self {
        Self {
            id,
            owner: &record.owner,
            repo: &record.repo,
            username: &record.username,
            avatar_url: &record.avatar_url,
            site_admin: record.site_admin,
            contributions: record.contributions,
            created_at,
        }
    }
}

impl From<Contributor> for ContributorRecord {
    fn from(row: Contributor) -> Self {
        Self {
            owner: row.owner,
            repo: row.repo,
            username: row.username,
            avatar_url: row.avatar_url,
            site_admin: row.site_admin,
            contributions: row.contributions,
        }
    }
}
