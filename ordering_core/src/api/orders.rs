//! Order handlers, validation, and lifecycle rules.
//!
//! Orders carry a status state machine: updates may move an order
//! between `pending`, `preparing`, `out-for-delivery`, and `delivered`
//! in any direction, but `delivered` is terminal and a delete is only
//! legal while the order is still `pending`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use record_store_interface::next_id;

use super::error::{ApiError, ApiResult};
use super::state::ApiState;
use super::{as_integer, non_empty_string, ApiJson, Data, Envelope};
use crate::types::{LineItem, Order, OrderStatus};

const VALID_STATUS_MESSAGE: &str =
    "Order must have a status of pending, preparing, out-for-delivery, delivered";

// ============================================================================
// Request Types
// ============================================================================

/// Submitted order payload. Every field is kept as raw JSON so the
/// validator can distinguish "missing", "wrong-typed", and per-item
/// faults, each with its own 400 message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub deliver_to: Option<Value>,
    #[serde(default)]
    pub mobile_number: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub dishes: Option<Value>,
}

/// Order fields that passed the presence checks. `dishes` is still
/// raw; line items are typed by [`validate_line_items`].
#[derive(Debug, Clone)]
struct OrderDraft {
    deliver_to: String,
    mobile_number: String,
    dishes: Value,
}

// ============================================================================
// Validators
// ============================================================================

/// Presence check for the required order fields, in a fixed order.
/// Wrong-typed and empty values count as missing.
fn require_order_fields(payload: &OrderPayload) -> ApiResult<OrderDraft> {
    let deliver_to = non_empty_string(payload.deliver_to.as_ref())
        .ok_or_else(|| ApiError::validation_error("Order must include a deliverTo"))?
        .to_string();
    let mobile_number = non_empty_string(payload.mobile_number.as_ref())
        .ok_or_else(|| ApiError::validation_error("Order must include a mobileNumber"))?
        .to_string();
    let dishes = match &payload.dishes {
        Some(dishes) if !dishes.is_null() => dishes.clone(),
        _ => return Err(ApiError::validation_error("Order must include a dish")),
    };

    Ok(OrderDraft {
        deliver_to,
        mobile_number,
        dishes,
    })
}

/// `dishes` must be a non-empty array and every line item needs a
/// positive integer quantity. Dish ids are carried as submitted; they
/// are not checked against the dish store.
fn validate_line_items(dishes: &Value) -> ApiResult<Vec<LineItem>> {
    let items = match dishes.as_array() {
        Some(items) if !items.is_empty() => items,
        _ => {
            return Err(ApiError::validation_error(
                "Order must include at least one dish",
            ))
        }
    };

    let mut line_items = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let quantity = match item.get("quantity").and_then(as_integer) {
            Some(quantity) if quantity > 0 => quantity,
            _ => {
                return Err(ApiError::validation_error(format!(
                    "Dish {index} must have a quantity that is an integer greater than 0"
                )))
            }
        };
        let dish_id = item
            .get("dishId")
            .and_then(Value::as_str)
            .map(str::to_string);
        line_items.push(LineItem { dish_id, quantity });
    }

    Ok(line_items)
}

/// A body id, when submitted, must match the route id.
fn check_body_id(body_id: Option<&Value>, route_id: &str) -> ApiResult<()> {
    let body_id = match body_id {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(id)) if id.is_empty() => return Ok(()),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    };
    if body_id != route_id {
        return Err(ApiError::conflict(format!(
            "Order id does not match route id. Order: {body_id}, Route: {route_id}"
        )));
    }
    Ok(())
}

/// The submitted status, if any. Absent, null, and empty all count as
/// "no status"; any non-string value is an invalid status.
fn submitted_status(submitted: Option<&Value>) -> ApiResult<Option<&str>> {
    match submitted {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(status)) if status.is_empty() => Ok(None),
        Some(Value::String(status)) => Ok(Some(status)),
        Some(_) => Err(ApiError::validation_error(VALID_STATUS_MESSAGE)),
    }
}

/// Status on create. Absent defaults to `pending`; a submitted value
/// must be one of the four defined stages.
fn status_for_create(submitted: Option<&Value>) -> ApiResult<OrderStatus> {
    match submitted_status(submitted)? {
        None => Ok(OrderStatus::Pending),
        Some(status) => status
            .parse()
            .map_err(|_| ApiError::validation_error(VALID_STATUS_MESSAGE)),
    }
}

/// Status on update. A value is required and must be one of the four
/// defined stages; a `delivered` order rejects any further update.
fn status_for_update(submitted: Option<&Value>, current: OrderStatus) -> ApiResult<OrderStatus> {
    let next: OrderStatus = match submitted_status(submitted)? {
        None => return Err(ApiError::validation_error(VALID_STATUS_MESSAGE)),
        Some(status) => status
            .parse()
            .map_err(|_| ApiError::validation_error(VALID_STATUS_MESSAGE))?,
    };

    if current == OrderStatus::Delivered {
        return Err(ApiError::validation_error(
            "A delivered order cannot be changed",
        ));
    }

    Ok(next)
}

/// Delete precondition: only pending orders may be removed.
fn check_pending(current: OrderStatus) -> ApiResult<()> {
    if current != OrderStatus::Pending {
        return Err(ApiError::validation_error(
            "An order cannot be deleted unless it is pending",
        ));
    }
    Ok(())
}

fn order_not_found(order_id: &str) -> ApiError {
    ApiError::not_found(format!("orderId {order_id} does not exist"))
}

// ============================================================================
// Handlers
// ============================================================================

/// List all orders in insertion order.
pub async fn list_orders(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let orders = state.orders.list().await;
    Ok(Json(Data { data: orders }))
}

/// Create a new order.
pub async fn create_order(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<Envelope<OrderPayload>>,
) -> ApiResult<impl IntoResponse> {
    let payload = body.data.unwrap_or_default();

    let draft = require_order_fields(&payload)?;
    let dishes = validate_line_items(&draft.dishes)?;
    let status = status_for_create(payload.status.as_ref())?;

    let order = Order {
        id: next_id(),
        deliver_to: draft.deliver_to,
        mobile_number: draft.mobile_number,
        status,
        dishes,
    };

    state.orders.append(order.clone()).await;
    tracing::info!(order_id = %order.id, status = %order.status, "created order");

    Ok((StatusCode::CREATED, Json(Data { data: order })))
}

/// Get an order by id.
pub async fn read_order(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .orders
        .find(&order_id)
        .await
        .ok_or_else(|| order_not_found(&order_id))?;

    Ok(Json(Data { data: order }))
}

/// Update an order. Checks run in a fixed order: existence, field
/// presence, line items, body/route id match, status rules. The route
/// id is authoritative; nothing is stored until every check passes.
pub async fn update_order(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
    ApiJson(body): ApiJson<Envelope<OrderPayload>>,
) -> ApiResult<impl IntoResponse> {
    let existing = state
        .orders
        .find(&order_id)
        .await
        .ok_or_else(|| order_not_found(&order_id))?;

    let payload = body.data.unwrap_or_default();
    let draft = require_order_fields(&payload)?;
    let dishes = validate_line_items(&draft.dishes)?;
    check_body_id(payload.id.as_ref(), &order_id)?;
    let status = status_for_update(payload.status.as_ref(), existing.status)?;

    let order = Order {
        id: existing.id,
        deliver_to: draft.deliver_to,
        mobile_number: draft.mobile_number,
        status,
        dishes,
    };

    state.orders.replace(order.clone()).await;
    tracing::info!(order_id = %order.id, status = %order.status, "updated order");

    Ok(Json(Data { data: order }))
}

/// Delete an order. Only pending orders may be deleted; the response
/// carries no body.
pub async fn delete_order(
    State(state): State<ApiState>,
    Path(order_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let existing = state
        .orders
        .find(&order_id)
        .await
        .ok_or_else(|| order_not_found(&order_id))?;

    check_pending(existing.status)?;

    state.orders.remove(&order_id).await;
    tracing::info!(order_id = %order_id, "deleted order");

    Ok(StatusCode::NO_CONTENT)
}
