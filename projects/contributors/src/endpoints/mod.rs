pub mod github;
pub mod response;
pub mod root;

use axum::{
	routing::{get, post},
	Extension, Router,
};

use crate::state::AppState;
use github::contributors::{
	ingest::index::handler as github_contributors_ingest_handler,
	lookup::index::handler as github_contributors_lookup_handler,
};
use root::index::handler as root_handler;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(root_handler))
		.route("/ingest-contributors", post(github_contributors_ingest_handler))
		.route("/contributors", post(github_contributors_lookup_handler))
		.layer(Extension(state))
}
