//! Reconstruct an [`ApiException`] from a received error response.
//!
//! Decoding never fails. Every malformed input degrades to a less detailed
//! exception, and the reason is logged at warn level.

use axum::http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::exception::ApiException;
use super::message::ErrorMessage;
use super::KEY_ERRORS;

/// Why a decode step could not produce the detailed result
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read response body: {0}")]
    Read(String),

    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("response body is not JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response body is not a JSON object")]
    NotAnObject,

    #[error("value under \"errors\" is not a list")]
    ErrorsNotAList,
}

/// Body of a received response, captured once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Absent,
    Bytes(Vec<u8>),
    /// The body existed but could not be read
    Unreadable(String),
}

/// Snapshot of a received HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedResponse {
    status: u16,
    body: ResponseBody,
}

impl ReceivedResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    pub fn without_body(status: u16) -> Self {
        Self::new(status, ResponseBody::Absent)
    }

    pub fn with_text(status: u16, text: impl Into<String>) -> Self {
        Self::new(status, ResponseBody::Bytes(text.into().into_bytes()))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn has_body(&self) -> bool {
        !matches!(self.body, ResponseBody::Absent)
    }

    /// Standard reason phrase for the status, e.g. "Not Found"
    pub fn reason_phrase(&self) -> Option<&'static str> {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
    }

    /// Consume the response and read its body as text
    fn into_text(self) -> Result<String, DecodeError> {
        match self.body {
            ResponseBody::Absent => Ok(String::new()),
            ResponseBody::Bytes(bytes) => Ok(String::from_utf8(bytes)?),
            ResponseBody::Unreadable(reason) => Err(DecodeError::Read(reason)),
        }
    }
}

/// Convert a response to an exception; `None` in gives `None` out.
pub fn to_api_exception(response: Option<ReceivedResponse>) -> Option<ApiException> {
    response.map(from_response)
}

/// Convert a response to an exception.
///
/// A JSON object body is handed to [`to_api_exception_from_entity`]. A missing
/// or blank body produces the status reason phrase as the only error. A body
/// that is not JSON becomes the error message verbatim. An unreadable body
/// produces an exception with no message.
pub fn from_response(response: ReceivedResponse) -> ApiException {
    let status = response.status();
    let reason_phrase = response.reason_phrase();

    if !response.has_body() {
        return reason_phrase_exception(reason_phrase, status);
    }

    let text = match response.into_text() {
        Ok(text) if text.trim().is_empty() => {
            warn!(status, "Response has a blank entity, using the reason phrase");
            return reason_phrase_exception(reason_phrase, status);
        }
        Ok(text) => text,
        Err(e) => {
            warn!(status, error = %e, "Error reading entity from response");
            return ApiException::without_message(status);
        }
    };

    match parse_entity(&text) {
        Ok(entity) => to_api_exception_from_entity(status, Some(entity)),
        Err(e) => {
            warn!(status, error = %e, "Error converting response text to a JSON object");
            ApiException::new(text, status)
        }
    }
}

/// Convert a status and a response entity to an exception.
///
/// The list under `errors` becomes the exception's errors; elements that are
/// not objects are dropped. Every other entry becomes
/// other data. An entity without `errors` keeps its data but gets an exception
/// with no message. If `errors` is not a list, only the status survives.
pub fn to_api_exception_from_entity(
    status: u16,
    entity: Option<Map<String, Value>>,
) -> ApiException {
    let entity = entity.unwrap_or_default();

    if !entity.contains_key(KEY_ERRORS) {
        return ApiException::without_message(status).with_other_data(entity);
    }

    match extract_error_messages(&entity) {
        Ok(errors) => ApiException::from_errors(errors, status).with_other_data(entity),
        Err(e) => {
            warn!(status, error = %e, entity = ?entity, "Error converting given entity map");
            ApiException::without_message(status)
        }
    }
}

fn reason_phrase_exception(reason_phrase: Option<&str>, status: u16) -> ApiException {
    match reason_phrase {
        Some(reason) => ApiException::new(reason, status),
        None => ApiException::without_message(status),
    }
}

fn parse_entity(text: &str) -> Result<Map<String, Value>, DecodeError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// One element of the `errors` list, classified by shape
enum ErrorElement<'a> {
    /// An object, read leniently as an error message
    Mapping(&'a Map<String, Value>),
    Other,
}

impl<'a> ErrorElement<'a> {
    fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            _ => Self::Other,
        }
    }

    fn into_error_message(self) -> Option<ErrorMessage> {
        match self {
            Self::Mapping(map) => Some(ErrorMessage::from_map(map)),
            Self::Other => None,
        }
    }
}

fn extract_error_messages(entity: &Map<String, Value>) -> Result<Vec<ErrorMessage>, DecodeError> {
    let Some(value) = entity.get(KEY_ERRORS) else {
        return Ok(Vec::new());
    };

    let elements = value.as_array().ok_or(DecodeError::ErrorsNotAList)?;

    Ok(elements
        .iter()
        .filter_map(|element| ErrorElement::classify(element).into_error_message())
        .collect())
}
