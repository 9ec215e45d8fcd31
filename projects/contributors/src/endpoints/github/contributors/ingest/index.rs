use axum::{
	extract::{Extension, Json},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use interfaces_github_contributors::index::{
	parse_contributors, FetchRepoContributorsError, GitHubClient, GitHubContributor, GitHubRestResult,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
	endpoints::response::{error_chain, error_response, MessageResponse},
	state::AppState,
	store::{ContributorRecord, ContributorStore, StoreError},
};

/// JSON payload expected by the endpoint.
#[derive(Debug, Deserialize)]
pub struct IngestContributorsRequest {
	pub owner: String,
	pub repo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionSummary {
	pub inserted: usize,
	pub total_contributions: i64,
}

impl IngestionSummary {
	pub fn message(&self) -> String {
		format!(
			"Successfully ingested {} contributors into Github_Data.Contributors collection",
			self.total_contributions
		)
	}
}

#[derive(Debug, Error)]
pub enum IngestContributorsError {
	#[error("FetchRepoContributors: {source}")]
	FetchRepoContributors {
		#[from]
		source: FetchRepoContributorsError,
	},

	#[error("UpstreamStatus: {status}: {body}")]
	UpstreamStatus {
		status: StatusCode,
		body: String,
	},

	#[error("DeserializeResponseBody: {source}")]
	DeserializeResponseBody {
		#[from]
		source: serde_json::Error,
	},

	#[error("InsertContributor: inserted {inserted} before failing: {source}")]
	InsertContributor {
		inserted: usize,
		#[source]
		source: StoreError,
	},
}

impl IntoResponse for IngestContributorsError {
	fn into_response(self) -> Response {
		error!(error = %error_chain(&self), "contributor ingestion failed");

		match self {
			IngestContributorsError::UpstreamStatus { .. } => {
				error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch contributors")
			}
			IngestContributorsError::FetchRepoContributors { .. }
			| IngestContributorsError::DeserializeResponseBody { .. }
			| IngestContributorsError::InsertContributor { .. } => {
				error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
			}
		}
	}
}

/// Axum handler: POST /ingest-contributors
pub async fn handler(
	Extension(state): Extension<AppState>,
	Json(input): Json<IngestContributorsRequest>,
) -> Result<Json<MessageResponse>, IngestContributorsError> {
	info!(owner = %input.owner, repo = %input.repo, "fetching contributors");

	let summary = ingest_contributors(state.store.as_ref(), &state.github, &input.owner, &input.repo).await?;

	info!(
		owner = %input.owner,
		repo = %input.repo,
		inserted = summary.inserted,
		total_contributions = summary.total_contributions,
		"contributors ingested"
	);

	Ok(Json(MessageResponse {
		message: summary.message(),
	}))
}

/// Fetches the upstream listing and writes one record per entry.
///
/// Writes are not transactional: records inserted before a failing write
/// stay in the store.
pub async fn ingest_contributors(
	store: &dyn ContributorStore,
	github: &GitHubClient,
	owner: &str,
	repo: &str,
) -> Result<IngestionSummary, IngestContributorsError> {
	let GitHubRestResult { body, status } = github.fetch_repo_contributors(owner, repo).await?;

	if !status.is_success() {
		return Err(IngestContributorsError::UpstreamStatus { status, body });
	}

	let upstream = parse_contributors(&body)?;

	let mut summary = IngestionSummary {
		inserted: 0,
		total_contributions: 0,
	};

	for (idx, contributor) in upstream.into_iter().enumerate() {
		let record = to_contributor_record(owner, repo, contributor);
		summary.total_contributions = summary.total_contributions.saturating_add(record.contributions);

		debug!(idx, username = %record.username, contributions = record.contributions, "inserting contributor");

		store
			.insert_one(record)
			.await
			.map_err(|source| IngestContributorsError::InsertContributor {
				inserted: summary.inserted,
				source,
			})?;
		summary.inserted += 1;
	}

	Ok(summary)
}

pub fn to_contributor_record(owner: &str, repo: &str, contributor: GitHubContributor) -> ContributorRecord {
	ContributorRecord {
		owner: owner.to_owned(),
		repo: repo.to_owned(),
		username: contributor.login,
		avatar_url: contributor.avatar_url,
		site_admin: contributor.site_admin,
		contributions: contributor.contributions,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn login_becomes_username() {
		let record = to_contributor_record(
			"rust-lang",
			"cargo",
			GitHubContributor {
				login: "octocat".into(),
				avatar_url: "https://avatars.example/1".into(),
				site_admin: true,
				contributions: 12,
			},
		);

		assert_eq!(
			record,
			ContributorRecord {
				owner: "rust-lang".into(),
				repo: "cargo".into(),
				username: "octocat".into(),
				avatar_url: "https://avatars.example/1".into(),
				site_admin: true,
				contributions: 12,
			}
		);
	}

	#[test]
	fn summary_message_reports_contribution_total() {
		let summary = IngestionSummary {
			inserted: 2,
			total_contributions: 17,
		};
		assert_eq!(
			summary.message(),
			"Successfully ingested 17 contributors into Github_Data.Contributors collection"
		);
	}

	#[tokio::test]
	async fn connect_failure_log_carries_root_cause() {
		let store = crate::store::MemoryContributorStore::new();
		let github = GitHubClient::new(
			url::Url::parse("http://127.0.0.1:1").unwrap(),
			"secret",
			std::time::Duration::from_secs(5),
		)
		.unwrap();

		let err = ingest_contributors(&store, &github, "a", "b").await.unwrap_err();
		assert!(matches!(err, IngestContributorsError::FetchRepoContributors { .. }));

		let logged = error_chain(&err);
		assert!(logged.starts_with("FetchRepoContributors: RequestSend:"), "{logged}");
		assert!(logged.to_lowercase().contains("refused"), "{logged}");
		assert!(store.records().unwrap().is_empty());
	}

	#[test]
	fn upstream_status_hides_detail() {
		let response = IngestContributorsError::UpstreamStatus {
			status: StatusCode::NOT_FOUND,
			body: r#"{"message":"Not Found"}"#.into(),
		}
		.into_response();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
