use axum::{
    body::Body,
    extract::Path,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use service_kit::errors::{
    build_response, from_response, read_api_exception, to_api_exception, ApiException,
    ErrorMessage, IntoReceivedResponse, ReceivedResponse,
};

const BODY_LIMIT: usize = 64 * 1024;

async fn get_widget(Path(id): Path<u32>) -> Result<Json<Value>, ApiException> {
    match id {
        1 => Ok(Json(json!({"id": 1, "name": "sprocket"}))),
        13 => {
            let mut data = Map::new();
            data.insert("traceId".to_owned(), json!("trace-13"));
            Err(ApiException::forbidden("Widget 13 is restricted").with_other_data(data))
        }
        _ => Err(ApiException::not_found_for("Widget", id)),
    }
}

// Helper to create test app
fn create_test_app() -> Router {
    Router::new().route("/widgets/:id", get(get_widget))
}

// Helper to send request and parse JSON response
async fn send_json_request(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));

    (status, json)
}

fn sample_exception() -> ApiException {
    let mut data = Map::new();
    data.insert("traceId".to_owned(), json!("abc-123"));
    data.insert("retryable".to_owned(), json!(false));

    ApiException::from_errors(
        vec![
            ErrorMessage::new("Name is required").with_field_name("name"),
            ErrorMessage::new("Item is locked")
                .with_item_id("item-9")
                .with_code("LOCKED"),
            ErrorMessage::new("Quota exceeded").with_code(429u16),
        ],
        409,
    )
    .with_other_data(data)
}

#[tokio::test]
async fn test_handler_error_is_rendered_as_json() {
    let (status, body) = send_json_request(create_test_app(), "/widgets/7").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"errors": [{"code": 404, "message": "Widget 7 not found"}]})
    );
}

#[tokio::test]
async fn test_handler_error_carries_other_data() {
    let (status, body) = send_json_request(create_test_app(), "/widgets/13").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["traceId"], "trace-13");
    assert_eq!(body["errors"][0]["message"], "Widget 13 is restricted");
}

#[tokio::test]
async fn test_handler_success_is_untouched() {
    let (status, body) = send_json_request(create_test_app(), "/widgets/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "sprocket");
}

#[tokio::test]
async fn test_round_trip_through_axum_response() {
    let original = sample_exception();

    let received = build_response(&original).into_received(BODY_LIMIT).await;
    let decoded = from_response(received);

    assert_eq!(decoded, original);
}

#[tokio::test]
async fn test_round_trip_through_reqwest_response() {
    let original = sample_exception();

    let response = build_response(&original);
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .unwrap();
    let response: reqwest::Response = axum::http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(bytes.to_vec())
        .unwrap()
        .into();

    let decoded = read_api_exception(response, BODY_LIMIT).await;
    assert_eq!(decoded.status_code(), 409);
    assert_eq!(decoded.errors(), original.errors());
    assert_eq!(decoded.other_data(), original.other_data());
}

#[tokio::test]
async fn test_decode_live_handler_response() {
    let request = Request::builder()
        .uri("/widgets/99")
        .body(Body::empty())
        .unwrap();
    let response = create_test_app().oneshot(request).await.unwrap();

    let decoded = read_api_exception(response, BODY_LIMIT).await;
    assert_eq!(decoded.status_code(), 404);
    assert_eq!(decoded.message(), Some("Widget 99 not found"));
}

#[tokio::test]
async fn test_decode_plain_text_error_page() {
    let response: reqwest::Response = axum::http::Response::builder()
        .status(502)
        .header("content-type", "text/html")
        .body("<html>Bad Gateway</html>".to_owned())
        .unwrap()
        .into();

    let decoded = read_api_exception(response, BODY_LIMIT).await;
    assert_eq!(decoded.status_code(), 502);
    assert_eq!(decoded.message(), Some("<html>Bad Gateway</html>"));
    assert!(decoded.other_data().is_empty());
}

#[test]
fn test_decode_partially_malformed_body() {
    let body = json!({
        "errors": [{"message": "bad"}, 42, "oops"],
        "traceId": "abc"
    });

    let decoded = to_api_exception(Some(ReceivedResponse::with_text(400, body.to_string())))
        .expect("response was present");

    assert_eq!(decoded.errors(), &[ErrorMessage::new("bad")]);
    assert_eq!(Value::Object(decoded.other_data().clone()), json!({"traceId": "abc"}));
}
