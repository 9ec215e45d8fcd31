use std::error::Error;

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
	pub message: String,
}

/// Error body. Only the fixed message reaches the caller; the cause is logged.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub detail: String,
}

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
	(status, Json(ErrorResponse { detail: detail.into() })).into_response()
}

/// `Display` of the error and every `source()` below it, joined with ` <- `.
/// reqwest keeps the I/O cause out of its own message, so logging only the
/// top level loses it.
pub fn error_chain(err: &dyn Error) -> String {
	let mut chain = err.to_string();
	let mut current = err.source();
	while let Some(source) = current {
		chain.push_str(" <- ");
		chain.push_str(&source.to_string());
		current = source.source();
	}
	chain
}

#[cfg(test)]
mod tests {
	use super::*;
	use thiserror::Error;

	#[derive(Debug, Error)]
	enum Outer {
		#[error("InsertContributor")]
		InsertContributor {
			#[source]
			source: Middle,
		},
	}

	#[derive(Debug, Error)]
	enum Middle {
		#[error("GetConnectionFromPool")]
		GetConnectionFromPool {
			#[source]
			source: std::io::Error,
		},
	}

	#[test]
	fn error_chain_reaches_root_cause() {
		let err = Outer::InsertContributor {
			source: Middle::GetConnectionFromPool {
				source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused"),
			},
		};
		assert_eq!(
			error_chain(&err),
			"InsertContributor <- GetConnectionFromPool <- Connection refused"
		);
	}

	#[test]
	fn error_chain_of_leaf_is_its_message() {
		let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
		assert_eq!(error_chain(&err), "boom");
	}
}
