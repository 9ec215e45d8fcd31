use std::sync::Arc;

use interfaces_github_contributors::index::{BuildGitHubClientError, GitHubClient};
use projects_contributors::{
	config::{Config, ConfigError},
	db::{build_pool, BuildPoolError},
	endpoints::router,
	state::AppState,
	store::PgContributorStore,
};
use thiserror::Error;
use tracing::{info, warn};
use utils_trace::tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
	#[error("LoadConfig: {source}")]
	LoadConfig {
		#[source]
		source: ConfigError,
	},
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("BuildPool: {source}")]
	BuildPool {
		#[source]
		source: BuildPoolError,
	},
	#[error("BuildGitHubClient: {source}")]
	BuildGitHubClient {
		#[source]
		source: BuildGitHubClientError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	},
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	// A missing .env is fine; the real environment may carry everything.
	let _ = dotenvy::dotenv();

	let config = Config::from_env().map_err(|source| MainError::LoadConfig { source })?;

	tracing_init(&config.log_level).map_err(|source| MainError::TracingInit { source })?;
	info!(?config, "configuration loaded");

	let pool = build_pool(&config.database_url, config.database_pool_size)
		.map_err(|source| MainError::BuildPool { source })?;

	let github = GitHubClient::new(
		config.github_api_url.clone(),
		config.github_api_token.clone(),
		config.github_api_timeout,
	)
	.map_err(|source| MainError::BuildGitHubClient { source })?;
	info!(base_url = %github.base_url(), "GitHub client ready");

	let state = AppState::new(Arc::new(PgContributorStore::new(pool)), github);
	let app = router(state);

	let listener = tokio::net::TcpListener::bind(config.bind_addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", config.bind_addr);

	axum::serve(listener, app)
		.with_graceful_shutdown(wait_for_shutdown_signal())
		.await
		.map_err(|source| MainError::Serve { source })?;

	info!("Server stopped");
	Ok(())
}

async fn wait_for_shutdown_signal() {
	#[cfg(unix)]
	{
		use tokio::signal::unix::{signal, SignalKind};

		match signal(SignalKind::terminate()) {
			Ok(mut sigterm) => {
				tokio::select! {
					_ = sigterm.recv() => {}
					_ = tokio::signal::ctrl_c() => {}
				}
			}
			Err(err) => {
				warn!(error = %err, "SIGTERM handler unavailable, waiting for Ctrl-C only");
				let _ = tokio::signal::ctrl_c().await;
			}
		}
	}
	#[cfg(not(unix))]
	{
		let _ = tokio::signal::ctrl_c().await;
	}
}
