//! Database configuration module for the sales ledger.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust models. Identifiers are produced by the database
//! (`AUTOINCREMENT` on `SQLite`, a sequence on `PostgreSQL`).

use crate::entities::{Transaction, TransactionDetail};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/sales_ledger.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the transaction and transaction detail tables if they do not exist yet.
///
/// The parent table is created first so the detail table's foreign key can reference it.
#[instrument(skip(db))]
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut transaction_table = schema.create_table_from_entity(Transaction);
    transaction_table.if_not_exists();
    let mut detail_table = schema.create_table_from_entity(TransactionDetail);
    detail_table.if_not_exists();

    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&detail_table)).await?;

    info!("Database tables ensured.");
    Ok(())
}
