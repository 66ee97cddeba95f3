//! Dish handlers and validation.

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
use crate::types::Dish;

// ============================================================================
// Request Types
// ============================================================================

/// Submitted dish payload. Every field is optional and kept as raw
/// JSON so the validator can report missing or wrong-typed fields
/// with the service's own 400 messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishPayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub image_url: Option<Value>,
}

/// Dish fields that passed the presence checks. `price` is still raw;
/// it is typed by [`validate_price`].
#[derive(Debug, Clone)]
struct DishDraft {
    name: String,
    description: String,
    price: Value,
    image_url: String,
}

// ============================================================================
// Validators
// ============================================================================

fn missing(field: &str) -> ApiError {
    ApiError::validation_error(format!("Dish must include a {field}"))
}

/// Presence check for the four required dish fields, in a fixed
/// order. Wrong-typed and empty values count as missing.
fn require_dish_fields(payload: &DishPayload) -> ApiResult<DishDraft> {
    let name = non_empty_string(payload.name.as_ref())
        .ok_or_else(|| missing("name"))?
        .to_string();
    let description = non_empty_string(payload.description.as_ref())
        .ok_or_else(|| missing("description"))?
        .to_string();
    let price = match &payload.price {
        Some(price) if !price.is_null() => price.clone(),
        _ => return Err(missing("price")),
    };
    let image_url = non_empty_string(payload.image_url.as_ref())
        .ok_or_else(|| missing("image_url"))?
        .to_string();

    Ok(DishDraft {
        name,
        description,
        price,
        image_url,
    })
}

/// Price must be a non-negative integer.
fn validate_price(draft: &DishDraft) -> ApiResult<i64> {
    match as_integer(&draft.price) {
        Some(price) if price >= 0 => Ok(price),
        _ => Err(ApiError::validation_error(
            "Dish must have a price that is an integer greater than 0",
        )),
    }
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
            "Dish id does not match route id. Dish: {body_id}, Route: {route_id}"
        )));
    }
    Ok(())
}

fn dish_not_found(dish_id: &str) -> ApiError {
    ApiError::not_found(format!("Dish does not exist: {dish_id}."))
}

// ============================================================================
// Handlers
// ============================================================================

/// List all dishes in insertion order.
pub async fn list_dishes(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let dishes = state.dishes.list().await;
    Ok(Json(Data { data: dishes }))
}

/// Create a new dish.
pub async fn create_dish(
    State(state): State<ApiState>,
    ApiJson(body): ApiJson<Envelope<DishPayload>>,
) -> ApiResult<impl IntoResponse> {
    let payload = body.data.unwrap_or_default();

    let draft = require_dish_fields(&payload)?;
    let price = validate_price(&draft)?;

    let dish = Dish {
        id: next_id(),
        name: draft.name,
        description: draft.description,
        price,
        image_url: draft.image_url,
    };

    state.dishes.append(dish.clone()).await;
    tracing::info!(dish_id = %dish.id, "created dish");

    Ok((StatusCode::CREATED, Json(Data { data: dish })))
}

/// Get a dish by id.
pub async fn read_dish(
    State(state): State<ApiState>,
    Path(dish_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let dish = state
        .dishes
        .find(&dish_id)
        .await
        .ok_or_else(|| dish_not_found(&dish_id))?;

    Ok(Json(Data { data: dish }))
}

/// Update a dish. Checks run in a fixed order: existence, field
/// presence, body/route id match, price validity. The route id is
/// authoritative; the stored record is only touched once every check
/// has passed.
pub async fn update_dish(
    State(state): State<ApiState>,
    Path(dish_id): Path<String>,
    ApiJson(body): ApiJson<Envelope<DishPayload>>,
) -> ApiResult<impl IntoResponse> {
    let existing = state
        .dishes
        .find(&dish_id)
        .await
        .ok_or_else(|| dish_not_found(&dish_id))?;

    let payload = body.data.unwrap_or_default();
    let draft = require_dish_fields(&payload)?;
    check_body_id(payload.id.as_ref(), &dish_id)?;
    let price = validate_price(&draft)?;

    let dish = Dish {
        id: existing.id,
        name: draft.name,
        description: draft.description,
        price,
        image_url: draft.image_url,
    };

    state.dishes.replace(dish.clone()).await;
    tracing::info!(dish_id = %dish.id, "updated dish");

    Ok(Json(Data { data: dish }))
}
