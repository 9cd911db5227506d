//! Test helpers for relay-service integration tests.

#![allow(dead_code)]

use axum::{
    http::{HeaderMap, StatusCode, Uri},
    Json, Router,
};
use relay_service::config::{CorsConfig, GeminiConfig, MailConfig, RelayConfig};
use relay_service::models::PersonalInfo;
use relay_service::services::{AnswerProvider, EmailProvider, MockEmailProvider};
use relay_service::startup::{AppState, Application};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;

pub const OWNER_EMAIL: &str = "owner@example.com";
pub const GEMINI_TEST_KEY: &str = "test-gemini-key";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(state: AppState) -> Self {
        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    /// Spawn with mocked providers.
    pub async fn spawn_with(
        mail_configured: bool,
        email: Arc<MockEmailProvider>,
        answers: Arc<dyn AnswerProvider>,
    ) -> Self {
        Self::spawn(mock_state(test_config(mail_configured), email, answers)).await
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn mail_config(configured: bool) -> MailConfig {
    if configured {
        MailConfig {
            host: Some("smtp.test.local".to_string()),
            port: Some(465),
            user: Some("mailer@example.com".to_string()),
            password: Some(Secret::new("test-password".to_string())),
            from_name: "Portfolio Contact".to_string(),
            owner_email: Some(OWNER_EMAIL.to_string()),
        }
    } else {
        MailConfig {
            host: Some("smtp.test.local".to_string()),
            port: None,
            user: None,
            password: None,
            from_name: "Portfolio Contact".to_string(),
            owner_email: None,
        }
    }
}

pub fn test_config(mail_configured: bool) -> RelayConfig {
    RelayConfig {
        common: CoreConfig { port: 0 },
        mail: mail_config(mail_configured),
        gemini: GeminiConfig {
            api_key: Some(Secret::new(GEMINI_TEST_KEY.to_string())),
            model: "gemini-2.0-flash".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            timeout_secs: 5,
        },
        cors: CorsConfig::default(),
        personal_info_path: None,
        otlp_endpoint: None,
    }
}

pub fn mock_state(
    config: RelayConfig,
    email: Arc<MockEmailProvider>,
    answers: Arc<dyn AnswerProvider>,
) -> AppState {
    let email_provider: Arc<dyn EmailProvider> = email;
    AppState {
        config: Arc::new(config),
        personal_info: PersonalInfo::builtin(),
        email_provider,
        answer_provider: answers,
    }
}

/// Poll until the mock has seen `expected` send attempts; the owner
/// notification is dispatched in the background.
pub async fn wait_for_send_attempts(email: &MockEmailProvider, expected: u64) {
    for _ in 0..100 {
        if email.send_attempts() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "expected {} send attempts, saw {}",
        expected,
        email.send_attempts()
    );
}

/// Start a stand-in for the Gemini REST API that answers every
/// `generateContent` call with `status` and `body`, and rejects calls
/// without the test API key.
pub async fn spawn_stub_gemini(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
        let body = body.clone();
        async move {
            let authorized = headers
                .get("x-goog-api-key")
                .and_then(|v| v.to_str().ok())
                == Some(GEMINI_TEST_KEY);

            if !uri.path().ends_with(":generateContent") {
                return (StatusCode::NOT_FOUND, Json(serde_json::json!({})));
            }
            if !authorized {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({ "error": { "message": "API key not valid" } })),
                );
            }
            (status, Json(body))
        }
    });

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1beta", addr)
}
