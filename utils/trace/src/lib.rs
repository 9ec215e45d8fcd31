//! Process-wide tracing setup shared by the workspace binaries.

use thiserror::Error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; `default_level` is used when it is unset or
/// unparseable.
pub fn tracing_init(default_level: &str) -> Result<(), TracingInitError> {
    let filter = build_filter(default_level)?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(true));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|source| TracingInitError::SetGlobalDefault { source })?;

    Ok(())
}

fn build_filter(default_level: &str) -> Result<EnvFilter, TracingInitError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|source| TracingInitError::InvalidFilter {
            directive: default_level.to_owned(),
            source,
        })
}

#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("InvalidFilter: {directive}: {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("SetGlobalDefault: {source}")]
    SetGlobalDefault {
        #[source]
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}
