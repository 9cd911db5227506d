//! Router-level tests that skip the TCP listener.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{mock_state, test_config};
use http_body_util::BodyExt;
use relay_service::services::{MockEmailProvider, MockTextProvider};
use relay_service::startup::build_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router(mail_configured: bool) -> axum::Router {
    build_router(mock_state(
        test_config(mail_configured),
        Arc::new(MockEmailProvider::new()),
        Arc::new(MockTextProvider::answering("Rust and React.")),
    ))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ask_returns_answer() {
    let response = router(true)
        .oneshot(post_json("/ask", json!({ "question": "Stack?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "answer": "Rust and React." }));
}

#[tokio::test]
async fn conversation_history_alias_is_accepted() {
    let response = router(true)
        .oneshot(post_json(
            "/ask",
            json!({
                "question": "And before that?",
                "conversationHistory": [{ "text": "Hello", "isBot": false }]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn whitespace_question_is_rejected() {
    let response = router(true)
        .oneshot(post_json("/ask", json!({ "question": "   \n" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Question is required" })
    );
}

#[tokio::test]
async fn malformed_contact_body_is_answered_like_an_invalid_email() {
    let request = Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router(true).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Please provide a valid email address" })
    );
}

#[tokio::test]
async fn null_or_non_string_email_is_an_invalid_email() {
    for email in [json!(null), json!(42), json!(["jo@example.com"])] {
        let response = router(true)
            .oneshot(post_json(
                "/contact",
                json!({ "name": "Jo", "email": email.clone(), "message": "Hi" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "email {email}");
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Please provide a valid email address" })
        );
    }
}

#[tokio::test]
async fn non_string_name_and_message_do_not_escape_the_contract() {
    let response = router(true)
        .oneshot(post_json(
            "/contact",
            json!({ "name": 7, "email": "jo@example.com", "message": { "text": "Hi" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Thank you for contacting us" })
    );
}

#[tokio::test]
async fn null_or_non_string_question_is_missing() {
    for question in [json!(null), json!(42), json!({ "text": "Stack?" })] {
        let response = router(true)
            .oneshot(post_json("/ask", json!({ "question": question.clone() })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "question {question}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Question is required" })
        );
    }
}

#[tokio::test]
async fn malformed_ask_body_is_a_missing_question() {
    let request = Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("[1, 2"))
        .unwrap();

    let response = router(true).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Question is required" })
    );
}

#[tokio::test]
async fn unknown_route_is_a_json_not_found() {
    let request = Request::builder()
        .uri("/nowhere")
        .body(Body::empty())
        .unwrap();

    let response = router(true).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn get_on_contact_is_not_allowed() {
    let request = Request::builder()
        .uri("/contact")
        .body(Body::empty())
        .unwrap();

    let response = router(true).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn missing_configuration_names_no_settings_to_the_client() {
    let response = router(false)
        .oneshot(post_json(
            "/contact",
            json!({ "name": "Jo", "email": "jo@example.com", "message": "Hi" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "message": "Server configuration error" }));
}
