//! Application startup and lifecycle management.

use crate::config::{CorsConfig, RelayConfig};
use crate::handlers::{
    ask, health_check, metrics_endpoint, not_found, readiness_check, submit_contact,
};
use crate::models::PersonalInfo;
use crate::services::{AnswerProvider, EmailProvider, GeminiTextProvider, SmtpProvider};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub personal_info: PersonalInfo,
    pub email_provider: Arc<dyn EmailProvider>,
    pub answer_provider: Arc<dyn AnswerProvider>,
}

impl AppState {
    /// Wire the production providers from configuration.
    pub fn from_config(config: RelayConfig) -> Result<Self, AppError> {
        let personal_info = PersonalInfo::load(config.personal_info_path.as_deref())?;

        if !config.mail.is_complete() {
            tracing::warn!(
                missing = ?config.mail.missing_settings(),
                "Mail credentials incomplete; contact submissions will be rejected"
            );
        }

        let email_provider: Arc<dyn EmailProvider> =
            Arc::new(SmtpProvider::new(config.mail.clone()));

        let answer_provider = GeminiTextProvider::new(config.gemini.clone())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
        if !answer_provider.is_configured() {
            tracing::warn!("GEMINI_API_KEY not set; questions will fail until it is configured");
        }

        Ok(Self {
            config: Arc::new(config),
            personal_info,
            email_provider,
            answer_provider: Arc::new(answer_provider),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/contact", post(submit_contact))
        .route("/contactme", post(submit_contact))
        .route("/ask", post(ask))
        .fallback(not_found)
        .layer(cors)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the production providers.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Build the application around an already wired state.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Relay service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve requests until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
