use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use utoipa::ToSchema;

/// Machine-readable error code, either numeric (usually an HTTP status) or textual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorCode {
    Numeric(i64),
    Text(String),
}

impl ErrorCode {
    /// Accepts integers and strings; anything else is not a code.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Numeric),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u16> for ErrorCode {
    fn from(status: u16) -> Self {
        Self::Numeric(i64::from(status))
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        Self::Text(code.to_owned())
    }
}

/// One discrete error reported to a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    /// Identifier of the item the error refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Error code for programmatic handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Human-readable error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Input field at fault, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Error whose code is the given HTTP status
    pub fn for_status(status: u16, message: Option<String>) -> Self {
        Self {
            code: Some(ErrorCode::from(status)),
            message,
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Build a message from a loosely-typed JSON object.
    ///
    /// Missing keys and values of the wrong JSON type are ignored rather than
    /// rejected. The text is read from `message`, falling back to `msg`.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            item_id: string_field(map, "itemId"),
            code: map.get("code").and_then(ErrorCode::from_value),
            message: string_field(map, "message").or_else(|| string_field(map, "msg")),
            field_name: string_field(map, "fieldName"),
        }
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

impl From<&ErrorMessage> for Value {
    fn from(error: &ErrorMessage) -> Self {
        let mut map = Map::new();
        if let Some(item_id) = &error.item_id {
            map.insert("itemId".to_owned(), Value::from(item_id.as_str()));
        }
        match &error.code {
            Some(ErrorCode::Numeric(n)) => {
                map.insert("code".to_owned(), Value::from(*n));
            }
            Some(ErrorCode::Text(s)) => {
                map.insert("code".to_owned(), Value::from(s.as_str()));
            }
            None => {}
        }
        if let Some(message) = &error.message {
            map.insert("message".to_owned(), Value::from(message.as_str()));
        }
        if let Some(field_name) = &error.field_name {
            map.insert("fieldName".to_owned(), Value::from(field_name.as_str()));
        }
        Value::Object(map)
    }
}
