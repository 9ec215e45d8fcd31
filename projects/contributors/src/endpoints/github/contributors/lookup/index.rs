use std::{fmt, str::FromStr};

use axum::{
	extract::{Extension, Json},
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::{
	endpoints::response::{error_chain, error_response},
	state::AppState,
	store::{ContributorFilter, ContributorRecord, ContributorStore, StoreError},
};

/// JSON payload expected by the endpoint. `type` is kept as free text so an
/// unknown value surfaces as a 400 from the handler, not an extractor 422.
#[derive(Debug, Deserialize)]
pub struct LookupContributorRequest {
	pub owner: String,
	pub repo: String,
	pub username: String,
	#[serde(rename = "type")]
	pub contributor_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributorType {
	User,
	Bot,
}

impl FromStr for ContributorType {
	type Err = LookupContributorError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"User" => Ok(ContributorType::User),
			"Bot" => Ok(ContributorType::Bot),
			other => Err(LookupContributorError::InvalidContributorType {
				value: other.to_owned(),
			}),
		}
	}
}

impl fmt::Display for ContributorType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ContributorType::User => f.write_str("User"),
			ContributorType::Bot => f.write_str("Bot"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupContributorResponse {
	pub username: String,
	pub avatar_url: String,
	pub site_admin: bool,
	pub contributions: i64,
}

impl From<ContributorRecord> for LookupContributorResponse {
	fn from(record: ContributorRecord) -> Self {
		Self {
			username: record.username,
			avatar_url: record.avatar_url,
			site_admin: record.site_admin,
			contributions: record.contributions,
		}
	}
}

#[derive(Debug, Error)]
pub enum LookupContributorError {
	#[error("Invalid contributor type. Must be 'User' or 'Bot'.")]
	InvalidContributorType { value: String },

	#[error("ContributorNotInDatabase: {owner}/{repo}/{username}")]
	ContributorNotInDatabase {
		owner: String,
		repo: String,
		username: String,
	},

	#[error("FindContributor: {source}")]
	FindContributor {
		#[from]
		source: StoreError,
	},
}

impl IntoResponse for LookupContributorError {
	fn into_response(self) -> Response {
		match self {
			LookupContributorError::InvalidContributorType { .. } => {
				error_response(StatusCode::BAD_REQUEST, self.to_string())
			}
			LookupContributorError::ContributorNotInDatabase { .. } => {
				error_response(StatusCode::NOT_FOUND, "Contributor not found.")
			}
			LookupContributorError::FindContributor { .. } => {
				error!(error = %error_chain(&self), "contributor lookup failed");
				error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
			}
		}
	}
}

/// Axum handler: POST /contributors
pub async fn handler(
	Extension(state): Extension<AppState>,
	Json(input): Json<LookupContributorRequest>,
) -> Result<Json<LookupContributorResponse>, LookupContributorError> {
	lookup_contributor(state.store.as_ref(), input).await.map(Json)
}

/// Validates `type`, then finds the first record for the
/// (owner, repo, username) triple. `type` never narrows the query.
pub async fn lookup_contributor(
	store: &dyn ContributorStore,
	input: LookupContributorRequest,
) -> Result<LookupContributorResponse, LookupContributorError> {
	let contributor_type: ContributorType = input.contributor_type.parse()?;

	let filter = ContributorFilter {
		owner: input.owner,
		repo: input.repo,
		username: input.username,
	};
	info!(
		owner = %filter.owner,
		repo = %filter.repo,
		username = %filter.username,
		%contributor_type,
		"querying contributor info"
	);

	match store.find_one(filter.clone()).await? {
		Some(record) => Ok(record.into()),
		None => Err(LookupContributorError::ContributorNotInDatabase {
			owner: filter.owner,
			repo: filter.repo,
			username: filter.username,
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemoryContributorStore;

	fn stored() -> ContributorRecord {
		ContributorRecord {
			owner: "a".into(),
			repo: "b".into(),
			username: "c".into(),
			avatar_url: "u".into(),
			site_admin: false,
			contributions: 5,
		}
	}

	fn request(username: &str, contributor_type: &str) -> LookupContributorRequest {
		LookupContributorRequest {
			owner: "a".into(),
			repo: "b".into(),
			username: username.into(),
			contributor_type: contributor_type.into(),
		}
	}

	#[test]
	fn contributor_type_accepts_exact_values_only() {
		assert_eq!("User".parse::<ContributorType>().unwrap(), ContributorType::User);
		assert_eq!("Bot".parse::<ContributorType>().unwrap(), ContributorType::Bot);
		assert!("user".parse::<ContributorType>().is_err());
		assert!("Organization".parse::<ContributorType>().is_err());
		assert!("".parse::<ContributorType>().is_err());
	}

	#[tokio::test]
	async fn type_does_not_filter_the_match() {
		let store = MemoryContributorStore::with_records([stored()]);

		for contributor_type in ["User", "Bot"] {
			let found = lookup_contributor(&store, request("c", contributor_type)).await.unwrap();
			assert_eq!(
				found,
				LookupContributorResponse {
					username: "c".into(),
					avatar_url: "u".into(),
					site_admin: false,
					contributions: 5,
				}
			);
		}
	}

	#[tokio::test]
	async fn invalid_type_wins_over_existing_match() {
		let store = MemoryContributorStore::with_records([stored()]);
		let err = lookup_contributor(&store, request("c", "Organization")).await.unwrap_err();
		assert!(matches!(err, LookupContributorError::InvalidContributorType { .. }));
		assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn store_failure_log_carries_root_cause() {
		let err = LookupContributorError::FindContributor {
			source: StoreError::Unavailable {
				reason: "connection refused".into(),
			},
		};
		assert_eq!(
			error_chain(&err),
			"FindContributor: Unavailable: connection refused <- Unavailable: connection refused"
		);
	}

	#[tokio::test]
	async fn missing_record_is_not_found() {
		let store = MemoryContributorStore::with_records([stored()]);
		let err = lookup_contributor(&store, request("nobody", "Bot")).await.unwrap_err();
		assert!(matches!(err, LookupContributorError::ContributorNotInDatabase { .. }));
		assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
	}
}
