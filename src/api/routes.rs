//! Application router: maps method and path to handler under the configured API prefix.

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, put},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api::{
        ApiState,
        handlers::{
            general::get_health,
            transaction::{
                create_transaction_endpoint, get_all_transactions_endpoint,
                search_transactions_endpoint,
            },
            transaction_detail::{
                delete_detail_endpoint, search_details_endpoint, update_detail_endpoint,
            },
        },
    },
    config::server::ServerConfig,
};

/// Health check, relative to the API prefix.
pub const HEALTH: &str = "/";
/// List and create transactions.
pub const TRANSACTIONS: &str = "/transaction";
/// Search transactions by reference number and customer name.
pub const TRANSACTION_SEARCH: &str = "/transaction/search";
/// Search transaction details.
pub const TRANSACTION_DETAILS: &str = "/transaction/detail";
/// Update or delete one transaction detail.
pub const TRANSACTION_DETAIL: &str = "/transaction/detail/{id}";

/// Return a router with all the app's routes nested under `config.api_prefix`.
pub fn build_router(state: ApiState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route(HEALTH, get(get_health))
        .route(
            TRANSACTIONS,
            get(get_all_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(TRANSACTION_SEARCH, get(search_transactions_endpoint))
        .route(TRANSACTION_DETAILS, get(search_details_endpoint))
        .route(
            TRANSACTION_DETAIL,
            put(update_detail_endpoint).delete(delete_detail_endpoint),
        );

    // Nesting at the root is not allowed, an empty prefix serves the routes directly.
    let prefix = config.api_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    router
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allows the listed origins, or any origin when the list is empty.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
