use utoipa::OpenApi;

use super::message::{ErrorCode, ErrorMessage};

/// Schemas of the JSON error body, for services that publish an OpenAPI document
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Service Kit Error Responses",
        version = "0.1.0",
        description = "Error bodies are JSON objects with an \"errors\" list of ErrorMessage entries. Any other top-level keys carry extra data such as a trace id."
    ),
    components(schemas(ErrorMessage, ErrorCode))
)]
pub struct ErrorApiDoc;
