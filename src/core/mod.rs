//! Core business logic - framework-agnostic data access and the atomic creation flow.

/// Transaction headers: creation with details, listing and search
pub mod transaction;
/// Transaction detail lines: search, quantity update and delete
pub mod transaction_detail;

use crate::errors::Result;
use sea_orm::{ActiveValue, DatabaseTransaction, Value};
use tracing::error;

/// Closes an atomic scope exactly once: commits when `outcome` is `Ok`, rolls back otherwise.
///
/// A failed rollback is logged and the original error is returned, since the database
/// discards the uncommitted work when the connection releases the transaction.
pub(crate) async fn finish_scope<T>(txn: DatabaseTransaction, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            error!("Rolling back: {}", e);
            if let Err(rollback_error) = txn.rollback().await {
                error!("Rollback failed: {}", rollback_error);
            }
            Err(e)
        }
    }
}

/// Maps an optional payload field onto an active model value.
///
/// Absent fields are left unset so the database's NOT NULL constraints report them.
pub(crate) fn set_if_present<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<Value>,
{
    value.map_or(ActiveValue::NotSet, ActiveValue::Set)
}
