//! Structured API errors and their JSON response representation

pub mod body;
pub mod decode;
pub mod exception;
pub mod message;
pub mod openapi;
pub mod response;

pub use body::{read_api_exception, read_body, IntoReceivedResponse};
pub use decode::{
    from_response, to_api_exception, to_api_exception_from_entity, DecodeError, ReceivedResponse,
    ResponseBody,
};
pub use exception::ApiException;
pub use message::{ErrorCode, ErrorMessage};
pub use openapi::ErrorApiDoc;
pub use response::{build_response, build_response_entity, response_parts};

/// The entity key under which the list of error messages resides
pub const KEY_ERRORS: &str = "errors";
