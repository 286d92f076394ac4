//! Transaction detail endpoints - search, quantity update and delete.
//!
//! A missing detail is answered with a normal response carrying
//! [`MessageResponse::DETAIL_NOT_FOUND`], not with an error status.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    api::{ApiJson, ApiPath, ApiState, MessageResponse},
    core::transaction_detail::{self, DetailFilter},
    entities::TransactionDetailModel,
    errors::Result,
};

/// Body of `PUT /transaction/detail/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDetailRequest {
    /// The new quantity
    pub qty: Option<i64>,
}

/// `GET /transaction/detail` - details matching the item name and transaction id substrings.
///
/// A request without a body matches every detail.
pub async fn search_details_endpoint(
    State(state): State<ApiState>,
    body: Option<ApiJson<DetailFilter>>,
) -> Result<Json<Vec<TransactionDetailModel>>> {
    let filter = body.map(|ApiJson(filter)| filter).unwrap_or_default();
    debug!("Detail search request: {:?}", filter);
    let details = transaction_detail::search_details(&state.database, &filter).await?;
    info!("Search matched {} detail(s)", details.len());
    Ok(Json(details))
}

/// `PUT /transaction/detail/{id}` - sets the quantity and recomputes the total.
pub async fn update_detail_endpoint(
    State(state): State<ApiState>,
    ApiPath(detail_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateDetailRequest>,
) -> Result<Json<MessageResponse>> {
    debug!("Detail {} update request: {:?}", detail_id, request);
    let updated =
        transaction_detail::update_detail_quantity(&state.database, detail_id, request.qty).await?;

    Ok(Json(match updated {
        Some(_) => MessageResponse::success(),
        None => MessageResponse::detail_not_found(),
    }))
}

/// `DELETE /transaction/detail/{id}` - removes one detail.
pub async fn delete_detail_endpoint(
    State(state): State<ApiState>,
    ApiPath(detail_id): ApiPath<i64>,
) -> Result<Json<MessageResponse>> {
    let deleted = transaction_detail::delete_detail(&state.database, detail_id).await?;

    Ok(Json(match deleted {
        Some(_) => MessageResponse::success(),
        None => MessageResponse::detail_not_found(),
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        api::MessageResponse,
        entities::TransactionDetailModel,
        test_utils::{
            get_detail_by_id, get_details_for_transaction, sample_detail, sample_transaction,
            setup_test_server,
        },
    };

    #[tokio::test]
    async fn update_multiplies_stored_total_by_quantity() {
        let (server, db) = setup_test_server().await;
        let created = crate::core::transaction::create_transaction(
            &db,
            sample_transaction("REF1", "Alice", vec![sample_detail("Pen", 5, 2, 10)]),
        )
        .await
        .unwrap();
        let detail = get_details_for_transaction(&db, created.id)
            .await
            .unwrap()
            .remove(0);

        let response = server
            .put(&format!("/api/transaction/detail/{}", detail.id))
            .json(&json!({"qty": 3}))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<MessageResponse>(),
            MessageResponse::success()
        );

        let stored = get_detail_by_id(&db, detail.id).await.unwrap().unwrap();
        assert_eq!(stored.qty, 3);
        assert_eq!(stored.total, 30);
        assert_eq!(stored.price, 5);
    }

    #[tokio::test]
    async fn update_missing_detail_reports_not_found_with_ok_status() {
        let (server, _) = setup_test_server().await;

        let response = server
            .put("/api/transaction/detail/5")
            .json(&json!({"qty": 3}))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<MessageResponse>().message,
            "transaction detail: not found"
        );
    }

    #[tokio::test]
    async fn update_without_quantity_is_a_server_error() {
        let (server, db) = setup_test_server().await;
        let created = crate::core::transaction::create_transaction(
            &db,
            sample_transaction("REF1", "Alice", vec![sample_detail("Pen", 5, 2, 10)]),
        )
        .await
        .unwrap();
        let detail = get_details_for_transaction(&db, created.id)
            .await
            .unwrap()
            .remove(0);

        let response = server
            .put(&format!("/api/transaction/detail/{}", detail.id))
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(get_detail_by_id(&db, detail.id).await.unwrap(), Some(detail));
    }

    #[tokio::test]
    async fn delete_removes_the_detail() {
        let (server, db) = setup_test_server().await;
        let created = crate::core::transaction::create_transaction(
            &db,
            sample_transaction(
                "REF1",
                "Alice",
                vec![sample_detail("Pen", 5, 2, 10), sample_detail("Ink", 3, 1, 3)],
            ),
        )
        .await
        .unwrap();
        let details = get_details_for_transaction(&db, created.id).await.unwrap();

        let response = server
            .delete(&format!("/api/transaction/detail/{}", details[0].id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<MessageResponse>().message, "success");
        assert_eq!(
            get_details_for_transaction(&db, created.id).await.unwrap(),
            vec![details[1].clone()]
        );
    }

    #[tokio::test]
    async fn delete_missing_detail_reports_not_found_with_ok_status() {
        let (server, _) = setup_test_server().await;

        let response = server.delete("/api/transaction/detail/42").await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<MessageResponse>(),
            MessageResponse::detail_not_found()
        );
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_server_error() {
        let (server, _) = setup_test_server().await;

        let response = server.delete("/api/transaction/detail/abc").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn search_matches_transaction_id_as_text() {
        let (server, db) = setup_test_server().await;
        for n in 1..=12 {
            crate::core::transaction::create_transaction(
                &db,
                sample_transaction(
                    &format!("REF{n}"),
                    "Alice",
                    vec![sample_detail(if n % 2 == 0 { "Pen" } else { "Paper" }, 1, 1, 1)],
                ),
            )
            .await
            .unwrap();
        }

        let response = server
            .get("/api/transaction/detail")
            .json(&json!({"stuff": "Pen", "transactionId": 1}))
            .await;

        response.assert_status_ok();
        let mut ids: Vec<i64> = response
            .json::<Vec<TransactionDetailModel>>()
            .into_iter()
            .map(|detail| detail.transaction_id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![10, 12]);
    }

    #[tokio::test]
    async fn search_without_body_matches_every_detail() {
        let (server, db) = setup_test_server().await;
        crate::core::transaction::create_transaction(
            &db,
            sample_transaction(
                "REF1",
                "Alice",
                vec![sample_detail("Pen", 5, 2, 10), sample_detail("Ink", 3, 1, 3)],
            ),
        )
        .await
        .unwrap();

        let response = server.get("/api/transaction/detail").await;

        response.assert_status_ok();
        let stuff: Vec<String> = response
            .json::<Vec<TransactionDetailModel>>()
            .into_iter()
            .map(|detail| detail.stuff)
            .collect();
        assert_eq!(stuff, vec!["Pen", "Ink"]);
    }
}
