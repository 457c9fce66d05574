use axum::http::StatusCode;
use serde_json::{Map, Value};
use std::fmt;

use super::message::ErrorMessage;
use super::KEY_ERRORS;

/// A failure to be surfaced to an API caller.
///
/// Carries the HTTP status, an ordered list of errors (the first one is the
/// primary error) and any extra top-level data that accompanied them, such as a
/// trace id. The extra data never contains the reserved `errors` key.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiException {
    status_code: u16,
    errors: Vec<ErrorMessage>,
    other_data: Map<String, Value>,
}

impl ApiException {
    /// Single-error exception whose error code is the status
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self::from_errors(
            vec![ErrorMessage::for_status(status_code, Some(message.into()))],
            status_code,
        )
    }

    /// Single-error exception with no message text
    pub fn without_message(status_code: u16) -> Self {
        Self::from_errors(vec![ErrorMessage::for_status(status_code, None)], status_code)
    }

    pub fn from_errors(errors: Vec<ErrorMessage>, status_code: u16) -> Self {
        Self {
            status_code,
            errors,
            other_data: Map::new(),
        }
    }

    /// Attach additional top-level data. The reserved `errors` key is dropped.
    pub fn with_other_data(mut self, other_data: Map<String, Value>) -> Self {
        self.other_data = without_key(other_data, KEY_ERRORS);
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn errors(&self) -> &[ErrorMessage] {
        &self.errors
    }

    pub fn other_data(&self) -> &Map<String, Value> {
        &self.other_data
    }

    /// Text of the primary error
    pub fn message(&self) -> Option<&str> {
        self.errors.first().and_then(|e| e.message.as_deref())
    }
}

/// Helpers for common statuses
impl ApiException {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST.as_u16())
    }

    pub fn not_authorized(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED.as_u16())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::FORBIDDEN.as_u16())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND.as_u16())
    }

    pub fn not_found_for(kind: &str, id: impl fmt::Display) -> Self {
        Self::not_found(format!("{} {} not found", kind, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::CONFLICT.as_u16())
    }

    /// 422 carrying one error per failed field
    pub fn validation(errors: Vec<ErrorMessage>) -> Self {
        let status = StatusCode::UNPROCESSABLE_ENTITY.as_u16();
        let errors = errors
            .into_iter()
            .map(|e| {
                if e.code.is_some() {
                    e
                } else {
                    e.with_code(status)
                }
            })
            .collect();
        Self::from_errors(errors, status)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR.as_u16())
    }
}

impl fmt::Display for ApiException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "HTTP {}", self.status_code),
        }
    }
}

impl std::error::Error for ApiException {}

/// New map holding every entry of `map` except `key`
pub(crate) fn without_key(map: Map<String, Value>, key: &str) -> Map<String, Value> {
    map.into_iter().filter(|(k, _)| k != key).collect()
}
