//! Spawns a relay-service instance with mock providers for the client to talk to.

#![allow(dead_code)]

use relay_service::config::{CorsConfig, GeminiConfig, MailConfig, RelayConfig};
use relay_service::models::PersonalInfo;
use relay_service::services::{AnswerProvider, EmailProvider, MockEmailProvider};
use relay_service::startup::{AppState, Application};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;

pub struct TestRelay {
    pub address: String,
}

impl TestRelay {
    pub async fn spawn(email: Arc<MockEmailProvider>, answers: Arc<dyn AnswerProvider>) -> Self {
        let email_provider: Arc<dyn EmailProvider> = email;
        let state = AppState {
            config: Arc::new(relay_config()),
            personal_info: PersonalInfo::builtin(),
            email_provider,
            answer_provider: answers,
        };

        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build relay");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(format!("{}/health", address)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestRelay { address }
    }
}

fn relay_config() -> RelayConfig {
    RelayConfig {
        common: CoreConfig { port: 0 },
        mail: MailConfig {
            host: Some("smtp.test.local".to_string()),
            port: Some(587),
            user: Some("mailer@example.com".to_string()),
            password: Some(Secret::new("test-password".to_string())),
            from_name: "Portfolio Contact".to_string(),
            owner_email: None,
        },
        gemini: GeminiConfig {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            timeout_secs: 5,
        },
        cors: CorsConfig::default(),
        personal_info_path: None,
        otlp_endpoint: None,
    }
}

/// An address nothing listens on.
pub fn unreachable_relay() -> String {
    "http://127.0.0.1:1".to_string()
}
