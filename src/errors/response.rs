use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use super::exception::ApiException;
use super::message::ErrorMessage;
use super::KEY_ERRORS;

/// Convert an exception to a map usable as a JSON response entity.
///
/// The entity holds every entry of the exception's other data plus the
/// `errors` list. `errors` is written last, so it wins if the other data
/// carries the same key.
pub fn build_response_entity(exception: &ApiException) -> Map<String, Value> {
    merge_entity(exception.other_data(), exception.errors())
}

fn merge_entity(other_data: &Map<String, Value>, errors: &[ErrorMessage]) -> Map<String, Value> {
    let mut entity = Map::new();

    if !other_data.is_empty() {
        entity.extend(other_data.clone());
    }

    entity.insert(
        KEY_ERRORS.to_owned(),
        Value::Array(errors.iter().map(Value::from).collect()),
    );

    entity
}

/// Status and JSON body for an exception, for callers that add headers of their own.
///
/// Statuses outside the valid HTTP range become 500.
pub fn response_parts(exception: &ApiException) -> (StatusCode, Json<Map<String, Value>>) {
    let status = StatusCode::from_u16(exception.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(build_response_entity(exception)))
}

/// Convert an exception to an `application/json` response
pub fn build_response(exception: &ApiException) -> Response {
    response_parts(exception).into_response()
}

impl IntoResponse for ApiException {
    fn into_response(self) -> Response {
        build_response(&self)
    }
}
