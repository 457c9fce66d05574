use async_trait::async_trait;
use std::io::Read;
use tracing::debug;

use super::decode::{from_response, ReceivedResponse, ResponseBody};
use super::exception::ApiException;

/// A live HTTP response whose body can be drained into a [`ReceivedResponse`].
///
/// The body is read once, up to `body_limit` bytes. Read failures and
/// oversized bodies are recorded as [`ResponseBody::Unreadable`]; an empty
/// body is [`ResponseBody::Absent`].
#[async_trait]
pub trait IntoReceivedResponse {
    async fn into_received(self, body_limit: usize) -> ReceivedResponse;
}

#[async_trait]
impl IntoReceivedResponse for axum::response::Response {
    async fn into_received(self, body_limit: usize) -> ReceivedResponse {
        let status = self.status().as_u16();

        let body = match axum::body::to_bytes(self.into_body(), body_limit).await {
            Ok(bytes) if bytes.is_empty() => ResponseBody::Absent,
            Ok(bytes) => ResponseBody::Bytes(bytes.to_vec()),
            Err(e) => {
                debug!(status, error = %e, "Failed to read response body");
                ResponseBody::Unreadable(e.to_string())
            }
        };

        ReceivedResponse::new(status, body)
    }
}

#[async_trait]
impl IntoReceivedResponse for reqwest::Response {
    async fn into_received(self, body_limit: usize) -> ReceivedResponse {
        let status = self.status().as_u16();
        let mut response = self;

        if let Some(length) = response.content_length() {
            if length > body_limit as u64 {
                debug!(status, length, body_limit, "Response body exceeds limit");
                return ReceivedResponse::new(status, over_limit(body_limit));
            }
        }

        // Chunked bodies carry no length, so the limit is checked per chunk
        let mut bytes = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if bytes.len() + chunk.len() > body_limit {
                        debug!(status, body_limit, "Response body exceeds limit");
                        return ReceivedResponse::new(status, over_limit(body_limit));
                    }
                    bytes.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(status, error = %e, "Failed to read response body");
                    return ReceivedResponse::new(status, ResponseBody::Unreadable(e.to_string()));
                }
            }
        }

        let body = if bytes.is_empty() {
            ResponseBody::Absent
        } else {
            ResponseBody::Bytes(bytes)
        };

        ReceivedResponse::new(status, body)
    }
}

/// Read a whole body from a blocking source, such as stdin, up to `body_limit` bytes
pub fn read_body<R: Read>(reader: R, body_limit: usize) -> ResponseBody {
    let mut bytes = Vec::new();
    if let Err(e) = reader
        .take(body_limit as u64 + 1)
        .read_to_end(&mut bytes)
    {
        debug!(error = %e, "Failed to read body");
        return ResponseBody::Unreadable(e.to_string());
    }

    if bytes.len() > body_limit {
        over_limit(body_limit)
    } else if bytes.is_empty() {
        ResponseBody::Absent
    } else {
        ResponseBody::Bytes(bytes)
    }
}

fn over_limit(body_limit: usize) -> ResponseBody {
    ResponseBody::Unreadable(format!("body exceeds limit of {} bytes", body_limit))
}

/// Drain a live response and decode it into an exception
pub async fn read_api_exception<R>(response: R, body_limit: usize) -> ApiException
where
    R: IntoReceivedResponse + Send,
{
    from_response(response.into_received(body_limit).await)
}
