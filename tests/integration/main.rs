//! Black-box tests for the text endpoints.
//!
//! Router tests drive the service in-process; the socket test binds a real
//! listener on an ephemeral port.
//!
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

use textops::api::{create_router, AppState};

fn app() -> Router {
    create_router(AppState::new())
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[rstest]
#[case("/uppercase?text=hello", json!({ "text": "HELLO" }))]
#[case("/uppercase?text=", json!({ "text": "" }))]
#[case("/uppercase?text=hello%20world", json!({ "text": "HELLO WORLD" }))]
#[case("/generate?message=ab&duplication_factor=3", json!({ "generated_text": "ababab" }))]
#[case(
    "/generate?message=Hi&duplication_factor=2&capitalization=UPPER",
    json!({ "generated_text": "HIHI" })
)]
#[case("/generate?message=Hi&capitalization=LOWER", json!({ "generated_text": "hi" }))]
#[case("/generate?message=x&duplication_factor=0", json!({ "generated_text": "" }))]
#[case("/generate?message=Hi", json!({ "generated_text": "Hi" }))]
#[case(
    "/generate?message=Hi&duplication_factor=2&capitalization=Title",
    json!({ "generated_text": "HiHi" })
)]
#[case("/generate?message=Hi&capitalization=", json!({ "generated_text": "Hi" }))]
#[tokio::test]
async fn successful_requests(#[case] uri: &str, #[case] expected: Value) {
    let (status, body) = get(uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[rstest]
#[case("/uppercase", "text")]
#[case("/generate", "message")]
#[case("/generate?duplication_factor=2", "message")]
#[case("/generate?message=x&duplication_factor=-1", "duplication_factor")]
#[case("/generate?message=x&duplication_factor=abc", "duplication_factor")]
#[case("/generate?message=x&duplication_factor=", "duplication_factor")]
#[tokio::test]
async fn rejected_requests_name_the_parameter(#[case] uri: &str, #[case] parameter: &str) {
    let (status, body) = get(uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["parameter"], parameter);
    assert!(body["error"].as_str().unwrap().contains(parameter));
}

#[rstest]
#[case("/uppercase?text=a&text=b", json!({ "text": "A" }))]
#[case(
    "/generate?message=ab&message=cd&duplication_factor=2&duplication_factor=9",
    json!({ "generated_text": "abab" })
)]
#[case(
    "/generate?message=Hi&capitalization=LOWER&capitalization=UPPER",
    json!({ "generated_text": "hi" })
)]
#[tokio::test]
async fn repeated_parameter_uses_first_value(#[case] uri: &str, #[case] expected: Value) {
    let (status, body) = get(uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn underscored_factor_is_accepted() {
    let (status, body) = get("/generate?message=x&duplication_factor=1_0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "generated_text": "xxxxxxxxxx" }));
}

#[tokio::test]
async fn oversized_output_is_rejected() {
    let (status, body) = get("/generate?message=ab&duplication_factor=18446744073709551615").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["parameter"], Value::Null);
}

#[tokio::test]
async fn openapi_document_describes_both_routes() {
    let (status, body) = get("/apispec_1.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["paths"]["/uppercase"]["get"]["tags"],
        json!(["Text Processing"])
    );
    assert_eq!(
        body["paths"]["/generate"]["get"]["tags"],
        json!(["String Processing"])
    );
}

#[tokio::test]
async fn serves_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move { axum::serve(listener, app()).await });

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"GET /uppercase?text=hello HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await
        .unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200 OK"));
    assert!(raw.ends_with(r#"{"text":"HELLO"}"#));

    server.abort();
}
