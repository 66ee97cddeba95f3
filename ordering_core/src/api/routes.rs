//! Route table.

use axum::http::{Method, Uri};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::state::ApiState;
use super::{dishes, orders};

/// Unsupported verb on a known route.
async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("{method} not allowed for {uri}"))
}

/// Build the application router over the given state.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/dishes",
            get(dishes::list_dishes)
                .post(dishes::create_dish)
                .fallback(method_not_allowed),
        )
        .route(
            "/dishes/:dish_id",
            get(dishes::read_dish)
                .put(dishes::update_dish)
                .fallback(method_not_allowed),
        )
        .route(
            "/orders",
            get(orders::list_orders)
                .post(orders::create_order)
                .fallback(method_not_allowed),
        )
        .route(
            "/orders/:order_id",
            get(orders::read_order)
                .put(orders::update_order)
                .delete(orders::delete_order)
                .fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
