//! Shared test utilities for the sales ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and building request payloads with sensible defaults.

use crate::{
    api::{ApiState, build_router},
    config::server::ServerConfig,
    core::{
        transaction::{NewTransaction, create_transaction},
        transaction_detail::NewTransactionDetail,
    },
    entities::{self, Transaction, TransactionDetail, transaction_detail},
    errors::Result,
};
use axum_test::TestServer;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber that writes through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a detail payload with every field present.
#[must_use]
pub fn sample_detail(stuff: &str, price: i64, qty: i64, total: i64) -> NewTransactionDetail {
    NewTransactionDetail {
        stuff: Some(stuff.to_string()),
        price: Some(price),
        qty: Some(qty),
        total: Some(total),
    }
}

/// Builds a transaction payload with every field present.
///
/// # Defaults
/// * `cost`: 100
/// * `shipping_cost`: 10
#[must_use]
pub fn sample_transaction(
    ref_number: &str,
    customer_name: &str,
    details: Vec<NewTransactionDetail>,
) -> NewTransaction {
    NewTransaction {
        transaction_ref_number: Some(ref_number.to_string()),
        customer_name: Some(customer_name.to_string()),
        cost: Some(100),
        shipping_cost: Some(10),
        details,
    }
}

/// Reads a stored transaction back by id.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<entities::transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Reads a stored detail back by id.
pub async fn get_detail_by_id(
    db: &DatabaseConnection,
    detail_id: i64,
) -> Result<Option<transaction_detail::Model>> {
    TransactionDetail::find_by_id(detail_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All stored details of one transaction, in id order.
pub async fn get_details_for_transaction(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Vec<transaction_detail::Model>> {
    TransactionDetail::find()
        .filter(transaction_detail::Column::TransactionId.eq(transaction_id))
        .order_by_asc(transaction_detail::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets up a database holding one transaction with the given details.
/// Returns (db, transaction, stored details) for detail-related tests.
pub async fn setup_with_details(
    details: Vec<NewTransactionDetail>,
) -> Result<(
    DatabaseConnection,
    entities::transaction::Model,
    Vec<entities::transaction_detail::Model>,
)> {
    let db = setup_test_db().await?;
    let transaction = create_transaction(&db, sample_transaction("REF", "Alice", details)).await?;
    let stored = get_details_for_transaction(&db, transaction.id).await?;
    Ok((db, transaction, stored))
}

/// Serves the full router, with the default configuration, over a fresh test database.
/// Returns the server together with the database so tests can inspect storage directly.
///
/// # Panics
/// Panics if the database or the server cannot be created.
#[allow(clippy::expect_used)]
pub async fn setup_test_server() -> (TestServer, DatabaseConnection) {
    let db = setup_test_db()
        .await
        .expect("Could not create test database.");
    let router = build_router(ApiState::new(db.clone()), &ServerConfig::default());
    let server = TestServer::new(router).expect("Could not create test server.");
    (server, db)
}
