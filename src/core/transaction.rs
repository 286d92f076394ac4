//! Transaction business logic - Handles the sale header operations.
//!
//! Creating a transaction inserts the header and every detail line inside one database
//! transaction: either all rows are persisted or none are. Listing and searching read the
//! headers directly; details are never included in these results.

use crate::{
    core::{
        finish_scope, set_if_present,
        transaction_detail::{NewTransactionDetail, insert_detail},
    },
    entities::{Transaction, transaction},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Payload for creating a transaction with its detail lines.
///
/// Fields are optional so that a missing value reaches the database, which rejects it
/// with a NOT NULL constraint error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// External reference number of the sale
    pub transaction_ref_number: Option<String>,
    /// Name of the buying customer
    pub customer_name: Option<String>,
    /// Cost of the goods
    pub cost: Option<i64>,
    /// Cost of shipping
    pub shipping_cost: Option<i64>,
    /// Detail lines, inserted in order
    #[serde(default)]
    pub details: Vec<NewTransactionDetail>,
}

/// Substring filters for [`search_transactions`]. An absent filter matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    /// Substring of the reference number
    pub transaction_ref_number: Option<String>,
    /// Substring of the customer name
    pub customer_name: Option<String>,
}

/// Inserts a single transaction header, stamping the transaction date and timestamps with
/// the current time.
///
/// Accepts any connection so it can run inside an open database transaction.
pub async fn insert_transaction<C>(db: &C, new: &NewTransaction) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();
    let transaction_model = transaction::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        transaction_ref_number: set_if_present(new.transaction_ref_number.clone()),
        transaction_date: Set(now),
        customer_name: set_if_present(new.customer_name.clone()),
        cost: set_if_present(new.cost),
        shipping_cost: set_if_present(new.shipping_cost),
        ..Default::default()
    };

    transaction_model.insert(db).await.map_err(Into::into)
}

/// Creates a transaction and all of its detail lines atomically.
///
/// The header is inserted first, then each detail in input order with its `transaction_id`
/// set to the new header's id. Totals are stored as given. If any insert fails the whole
/// database transaction is rolled back and the error is returned.
///
/// Returns the created header; the details are not included.
#[instrument(skip(db, new), fields(ref_number = ?new.transaction_ref_number, details = new.details.len()))]
pub async fn create_transaction(
    db: &DatabaseConnection,
    new: NewTransaction,
) -> Result<transaction::Model> {
    debug!("Create transaction request: {:?}", new);

    let txn = db.begin().await?;
    let outcome = insert_with_details(&txn, &new).await;
    let created = finish_scope(txn, outcome).await?;

    info!(
        "Created transaction {} with {} detail(s)",
        created.id,
        new.details.len()
    );
    Ok(created)
}

async fn insert_with_details<C>(db: &C, new: &NewTransaction) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let created = insert_transaction(db, new).await?;
    debug!("Inserted transaction header {}", created.id);

    for detail in &new.details {
        insert_detail(db, created.id, detail).await?;
    }

    Ok(created)
}

/// Retrieves every transaction in storage order. No pagination.
#[instrument(skip(db))]
pub async fn get_all_transactions(db: &DatabaseConnection) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds transactions whose reference number and customer name both contain the given
/// substrings.
#[instrument(skip(db))]
pub async fn search_transactions(
    db: &DatabaseConnection,
    filter: &TransactionFilter,
) -> Result<Vec<transaction::Model>> {
    let ref_number = filter.transaction_ref_number.as_deref().unwrap_or_default();
    let customer_name = filter.customer_name.as_deref().unwrap_or_default();

    Transaction::find()
        .filter(transaction::Column::TransactionRefNumber.contains(ref_number))
        .filter(transaction::Column::CustomerName.contains(customer_name))
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
