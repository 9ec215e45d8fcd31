//! GitHub repository contributor ingestion service
//!
//! - REST API endpoints in `endpoints/`
//! - PostgreSQL models and queries in `db/`, behind the `store::ContributorStore` seam
//! - Requires DATABASE_URL and GITHUB_API_TOKEN env vars, see `config`

pub mod config;
pub mod db;
pub mod endpoints;
pub mod state;
pub mod store;
