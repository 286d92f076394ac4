//! Transaction endpoints - list, search and create.

use axum::{Json, extract::State};
use tracing::{debug, info};

use crate::{
    api::{ApiJson, ApiState},
    core::transaction::{self, NewTransaction, TransactionFilter},
    entities::TransactionModel,
    errors::Result,
};

/// `GET /transaction` - every transaction, unfiltered.
pub async fn get_all_transactions_endpoint(
    State(state): State<ApiState>,
) -> Result<Json<Vec<TransactionModel>>> {
    let transactions = transaction::get_all_transactions(&state.database).await?;
    info!("Found {} transaction(s)", transactions.len());
    Ok(Json(transactions))
}

/// `GET /transaction/search` - transactions matching both substrings in the body.
///
/// A request without a body matches every transaction.
pub async fn search_transactions_endpoint(
    State(state): State<ApiState>,
    body: Option<ApiJson<TransactionFilter>>,
) -> Result<Json<Vec<TransactionModel>>> {
    let filter = body.map(|ApiJson(filter)| filter).unwrap_or_default();
    debug!("Search request: {:?}", filter);
    let transactions = transaction::search_transactions(&state.database, &filter).await?;
    info!("Search matched {} transaction(s)", transactions.len());
    Ok(Json(transactions))
}

/// `POST /transaction` - creates a transaction and its details in one database transaction.
///
/// Responds with the created transaction, without its details.
pub async fn create_transaction_endpoint(
    State(state): State<ApiState>,
    ApiJson(new): ApiJson<NewTransaction>,
) -> Result<Json<TransactionModel>> {
    let created = transaction::create_transaction(&state.database, new).await?;
    Ok(Json(created))
}
