//! REST layer - JSON endpoints, extractors and router construction.
//!
//! Handlers only translate between HTTP and the [`crate::core`] functions. Failures are
//! rendered by [`crate::errors::Error`]'s `IntoResponse` implementation.

/// Endpoint handlers grouped by resource
pub mod handlers;
/// Route table, CORS and tracing layers
pub mod routes;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, OptionalFromRequest, Request},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::errors::Error;

pub use routes::build_router;

/// Shared state available to all handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Database connection pool for all database operations
    pub database: DatabaseConnection,
}

impl ApiState {
    /// Creates a new `ApiState` with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// The `{"message": ...}` body used for acknowledgements, not-found outcomes and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Message sent when a write went through.
    pub const SUCCESS: &'static str = "success";
    /// Message sent when a detail id does not exist.
    pub const DETAIL_NOT_FOUND: &'static str = "transaction detail: not found";
    /// Message sent by the health check.
    pub const OK: &'static str = "ok";

    /// Creates a response carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The acknowledgement for a successful update or delete.
    #[must_use]
    pub fn success() -> Self {
        Self::new(Self::SUCCESS)
    }

    /// The outcome for an update or delete of a missing detail.
    #[must_use]
    pub fn detail_not_found() -> Self {
        Self::new(Self::DETAIL_NOT_FOUND)
    }
}

/// JSON body extractor whose rejections are reported as [`Error`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// `Option<ApiJson<T>>` is `None` when the request has no `Content-Type` header, so an empty
/// body can fall back to a default. A body that is present but malformed is still rejected.
impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(body.map(|Json(value)| Self(value)))
    }
}

/// Path extractor whose rejections are reported as [`Error`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);
