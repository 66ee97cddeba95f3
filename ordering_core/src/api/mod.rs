//! REST API: request envelopes, per-resource handlers, routes, state,
//! and the error type.

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use self::error::ApiError;

pub mod dishes;
pub mod error;
pub mod orders;
pub mod routes;
pub mod state;

/// Wire envelope: request and response payloads travel under a `data`
/// key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// Lenient request envelope. `data` is optional so that a missing or
/// empty body surfaces as per-field validation errors (400) rather
/// than a framework-level rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// `Json` wrapper whose rejection is the service's own 400 error
/// envelope. A body the envelope cannot deserialize still answers
/// with `{ "message": ... }`, never a framework rejection.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::validation_error(rejection.body_text())),
        }
    }
}

/// Non-empty string reading of an optional JSON value. Wrong-typed
/// values count as missing.
pub(crate) fn non_empty_string(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Integer reading of a JSON number. Integer-valued floats (`2.0`)
/// are accepted; anything with a fraction is not.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}
