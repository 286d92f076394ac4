//! Transaction detail business logic - Handles the line item operations.
//!
//! Details are created only through [`crate::core::transaction::create_transaction`].
//! Afterwards they can be searched, have their quantity changed, or be deleted one at a time.
//! A missing id is not an error here: update and delete return `Ok(None)` so callers can
//! report it as a normal outcome.

use crate::{
    core::{finish_scope, set_if_present},
    entities::{TransactionDetail, transaction_detail},
    errors::{Error, Result},
};
use sea_orm::{
    QueryOrder, Set, TransactionTrait,
    prelude::*,
    sea_query::{Alias, Expr, Func},
};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, instrument};

/// Payload for one detail line of a new transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTransactionDetail {
    /// Name of the item sold
    pub stuff: Option<String>,
    /// Unit price
    pub price: Option<i64>,
    /// Quantity sold
    pub qty: Option<i64>,
    /// Line total, stored as given
    pub total: Option<i64>,
}

/// Substring filters for [`search_details`]. An absent filter matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailFilter {
    /// Substring of the item name
    pub stuff: Option<String>,
    /// Substring of the owning transaction id written as text, e.g. `"12"` matches 12, 120
    /// and 212. Accepts a JSON string or number.
    #[serde(default, deserialize_with = "text_or_number")]
    pub transaction_id: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}

/// Inserts one detail line belonging to `transaction_id`.
///
/// The foreign key rejects ids that do not refer to an existing transaction.
pub async fn insert_detail<C>(
    db: &C,
    transaction_id: i64,
    detail: &NewTransactionDetail,
) -> Result<transaction_detail::Model>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();
    let detail_model = transaction_detail::ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        transaction_id: Set(transaction_id),
        stuff: set_if_present(detail.stuff.clone()),
        price: set_if_present(detail.price),
        qty: set_if_present(detail.qty),
        total: set_if_present(detail.total),
        ..Default::default()
    };

    let created = detail_model.insert(db).await?;
    debug!(
        "Inserted detail {} for transaction {}",
        created.id, transaction_id
    );
    Ok(created)
}

/// Finds details whose item name contains `filter.stuff` and whose transaction id, compared
/// as text, contains `filter.transaction_id`.
#[instrument(skip(db))]
pub async fn search_details(
    db: &DatabaseConnection,
    filter: &DetailFilter,
) -> Result<Vec<transaction_detail::Model>> {
    let stuff = filter.stuff.as_deref().unwrap_or_default();
    let transaction_id = filter.transaction_id.as_deref().unwrap_or_default();

    let transaction_id_text = Func::cast_as(
        Expr::col(transaction_detail::Column::TransactionId),
        Alias::new("text"),
    );

    TransactionDetail::find()
        .filter(transaction_detail::Column::Stuff.contains(stuff))
        .filter(Expr::expr(transaction_id_text).like(format!("%{transaction_id}%")))
        .order_by_asc(transaction_detail::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The total stored after a quantity change: the current total multiplied by the new quantity.
///
/// This is the rule the ledger has always applied. It differs from `price * qty` once a line
/// has been updated more than once.
pub fn recompute_total(stored_total: i64, qty: i64) -> Result<i64> {
    stored_total
        .checked_mul(qty)
        .ok_or(Error::TotalOverflow {
            total: stored_total,
            qty,
        })
}

/// Sets a detail's quantity and recomputes its total inside a database transaction.
///
/// Returns `Ok(None)` when no detail has `detail_id`, leaving storage untouched.
/// An absent `qty` is written as NULL and rejected by the database.
#[instrument(skip(db))]
pub async fn update_detail_quantity(
    db: &DatabaseConnection,
    detail_id: i64,
    qty: Option<i64>,
) -> Result<Option<transaction_detail::Model>> {
    let txn = db.begin().await?;
    let outcome = apply_quantity(&txn, detail_id, qty).await;
    let updated = finish_scope(txn, outcome).await?;

    match &updated {
        Some(detail) => info!(
            "Updated detail {}: qty={}, total={}",
            detail.id, detail.qty, detail.total
        ),
        None => info!("Detail {} not found, nothing updated", detail_id),
    }
    Ok(updated)
}

async fn apply_quantity<C>(
    db: &C,
    detail_id: i64,
    qty: Option<i64>,
) -> Result<Option<transaction_detail::Model>>
where
    C: ConnectionTrait,
{
    let Some(detail) = TransactionDetail::find_by_id(detail_id).one(db).await? else {
        return Ok(None);
    };

    let total = qty
        .map(|qty| recompute_total(detail.total, qty))
        .transpose()?;

    TransactionDetail::update_many()
        .col_expr(transaction_detail::Column::Qty, Expr::value(qty))
        .col_expr(transaction_detail::Column::Total, Expr::value(total))
        .col_expr(
            transaction_detail::Column::UpdatedAt,
            Expr::value(chrono::Utc::now()),
        )
        .filter(transaction_detail::Column::Id.eq(detail_id))
        .exec(db)
        .await?;

    TransactionDetail::find_by_id(detail_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a detail inside a database transaction.
///
/// Returns the deleted row, or `Ok(None)` when no detail has `detail_id`.
#[instrument(skip(db))]
pub async fn delete_detail(
    db: &DatabaseConnection,
    detail_id: i64,
) -> Result<Option<transaction_detail::Model>> {
    let txn = db.begin().await?;
    let outcome = remove_detail(&txn, detail_id).await;
    let deleted = finish_scope(txn, outcome).await?;

    if deleted.is_some() {
        info!("Deleted detail {}", detail_id);
    } else {
        info!("Detail {} not found, nothing deleted", detail_id);
    }
    Ok(deleted)
}

async fn remove_detail<C>(db: &C, detail_id: i64) -> Result<Option<transaction_detail::Model>>
where
    C: ConnectionTrait,
{
    let Some(detail) = TransactionDetail::find_by_id(detail_id).one(db).await? else {
        return Ok(None);
    };

    detail.clone().delete(db).await?;
    Ok(Some(detail))
}
