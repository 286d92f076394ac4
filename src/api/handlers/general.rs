//! General endpoints.

use axum::Json;

use crate::api::MessageResponse;

/// Reports that the server is up.
pub async fn get_health() -> Json<MessageResponse> {
    Json(MessageResponse::new(MessageResponse::OK))
}
