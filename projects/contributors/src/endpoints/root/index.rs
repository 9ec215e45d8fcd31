use axum::Json;

use crate::endpoints::response::MessageResponse;

/// Axum handler: GET /
pub async fn handler() -> Json<MessageResponse> {
	Json(MessageResponse {
		message: "Welcome to my web application".to_owned(),
	})
}
