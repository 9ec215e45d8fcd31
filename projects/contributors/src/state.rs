use std::sync::Arc;

use interfaces_github_contributors::index::GitHubClient;

use crate::store::ContributorStore;

/// Collaborators built once in `main` and shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContributorStore>,
    pub github: GitHubClient,
}

impl AppState {
    pub fn new(store: Arc<dyn ContributorStore>, github: GitHubClient) -> Self {
        Self { store, github }
    }
}
