//! Unified error type for the sales ledger.
//!
//! Every failure that reaches an HTTP handler is rendered as a server error with a
//! `{"message": ...}` body carrying the underlying error text.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::api::MessageResponse;

/// The errors that may occur in the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any error raised by the database or the ORM, including constraint violations.
    ///
    /// The message is the raw database error text.
    #[error("{0}")]
    Database(#[from] DbErr),

    /// Binding or serving the listener failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body or path could not be read in the expected shape.
    #[error("{message}")]
    InvalidRequest {
        /// The extractor's rejection text
        message: String,
    },

    /// Recomputing a detail total overflowed a 64-bit integer.
    #[error("total overflow: stored total {total} multiplied by quantity {qty}")]
    TotalOverflow {
        /// The total currently stored on the detail
        total: i64,
        /// The requested quantity
        qty: i64,
    },
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new(self.to_string())),
        )
            .into_response()
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
