use std::sync::Mutex;

use async_trait::async_trait;

use super::{ContributorFilter, ContributorRecord, ContributorStore, StoreError};

/// In-process store with the same append-only semantics as the database.
#[derive(Debug, Default)]
pub struct MemoryContributorStore {
    records: Mutex<Vec<ContributorRecord>>,
}

impl MemoryContributorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = ContributorRecord>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().collect()),
        }
    }

    pub fn records(&self) -> Result<Vec<ContributorRecord>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ContributorRecord>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Unavailable {
            reason: "memory store lock poisoned".to_owned(),
        })
    }
}

#[async_trait]
impl ContributorStore for MemoryContributorStore {
    async fn insert_one(&self, record: ContributorRecord) -> Result<(), StoreError> {
        self.lock()?.push(record);
        Ok(())
    }

    async fn find_one(&self, filter: ContributorFilter) -> Result<Option<ContributorRecord>, StoreError> {
        let records = self.lock()?;
        Ok(records.iter().find(|record| filter.matches(record)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, contributions: i64) -> ContributorRecord {
        ContributorRecord {
            owner: "a".into(),
            repo: "b".into(),
            username: username.into(),
            avatar_url: format!("https://avatars.example/{username}"),
            site_admin: false,
            contributions,
        }
    }

    fn filter(owner: &str, repo: &str, username: &str) -> ContributorFilter {
        ContributorFilter {
            owner: owner.into(),
            repo: repo.into(),
            username: username.into(),
        }
    }

    #[tokio::test]
    async fn find_one_returns_first_inserted_duplicate() {
        let store = MemoryContributorStore::new();
        store.insert_one(record("c", 5)).await.unwrap();
        store.insert_one(record("c", 9)).await.unwrap();

        let found = store.find_one(filter("a", "b", "c")).await.unwrap().unwrap();
        assert_eq!(found.contributions, 5);
        assert_eq!(store.records().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_one_is_case_sensitive() {
        let store = MemoryContributorStore::with_records([record("Octocat", 1)]);
        assert!(store.find_one(filter("a", "b", "octocat")).await.unwrap().is_none());
        assert!(store.find_one(filter("A", "b", "Octocat")).await.unwrap().is_none());
        assert!(store.find_one(filter("a", "b", "Octocat")).await.unwrap().is_some());
    }
}
