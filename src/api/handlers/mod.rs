//! Endpoint handlers organized by resource.

/// Health check
pub mod general;
/// Transaction header endpoints
pub mod transaction;
/// Transaction detail endpoints
pub mod transaction_detail;
