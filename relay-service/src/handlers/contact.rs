use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::Instrument;
use validator::{Validate, ValidationErrors};

use crate::models::contact::{
    CONTACT_ACCEPTED, EMAIL_CONFIGURATION_ERROR, EMAIL_DELIVERY_ERROR, INVALID_EMAIL,
    SERVER_CONFIGURATION_ERROR,
};
use crate::models::{ContactReply, ContactSubmission};
use crate::services::{record_contact_submission, record_email, templates, ProviderError};
use crate::startup::AppState;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("mail configuration incomplete: missing {0}")]
    MissingConfiguration(String),

    #[error("mail server verification failed: {0}")]
    Verification(ProviderError),

    #[error("acknowledgment delivery failed: {0}")]
    Delivery(ProviderError),

    #[error("email template rendering failed: {0}")]
    Rendering(#[from] askama::Error),
}

impl From<ValidationErrors> for ContactError {
    fn from(_: ValidationErrors) -> Self {
        ContactError::InvalidEmail
    }
}

impl ContactError {
    fn outcome(&self) -> &'static str {
        match self {
            ContactError::InvalidEmail => "invalid_email",
            ContactError::MissingConfiguration(_) => "not_configured",
            ContactError::Verification(_) => "verification_failed",
            ContactError::Delivery(_) => "delivery_failed",
            ContactError::Rendering(_) => "rendering_failed",
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ContactError::InvalidEmail => (StatusCode::BAD_REQUEST, INVALID_EMAIL),
            ContactError::MissingConfiguration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_CONFIGURATION_ERROR)
            }
            ContactError::Verification(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, EMAIL_CONFIGURATION_ERROR)
            }
            ContactError::Delivery(_) | ContactError::Rendering(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, EMAIL_DELIVERY_ERROR)
            }
        };

        (status, Json(ContactReply::new(message))).into_response()
    }
}

/// Relay a contact form submission by email.
///
/// Sends an acknowledgment to the submitter and a notification to the owner.
/// The response reflects the acknowledgment; the notification runs in the
/// background once the mail server has been verified. A body that cannot be
/// read as a submission is answered like an invalid email.
#[tracing::instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactReply>, ContactError> {
    let result = match payload {
        Ok(Json(submission)) => relay_submission(&state, submission).await,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected unreadable contact submission");
            Err(ContactError::InvalidEmail)
        }
    };

    match &result {
        Ok(()) => record_contact_submission("accepted"),
        Err(e) => record_contact_submission(e.outcome()),
    }

    result.map(|()| Json(ContactReply::new(CONTACT_ACCEPTED)))
}

async fn relay_submission(
    state: &AppState,
    submission: ContactSubmission,
) -> Result<(), ContactError> {
    submission.validate().map_err(|errors| {
        tracing::warn!(email = %submission.email, errors = %errors, "Rejected contact submission");
        ContactError::from(errors)
    })?;

    let mail = &state.config.mail;
    let missing = mail.missing_settings();
    if !missing.is_empty() {
        tracing::error!(missing = ?missing, "Mail provider credentials are not configured");
        return Err(ContactError::MissingConfiguration(missing.join(", ")));
    }

    let owner = mail
        .owner_mailbox()
        .ok_or_else(|| ContactError::MissingConfiguration("EMAIL_OWNER".to_string()))?
        .to_string();

    state.email_provider.verify().await.map_err(|e| {
        tracing::error!(error = %e, "Mail server verification failed");
        ContactError::Verification(e)
    })?;

    let notification = templates::owner_notification(&submission, &owner).map_err(|e| {
        tracing::error!(error = %e, "Failed to render owner notification");
        ContactError::from(e)
    })?;
    let acknowledgment = templates::acknowledgment(&submission).map_err(|e| {
        tracing::error!(error = %e, "Failed to render acknowledgment");
        ContactError::from(e)
    })?;

    let provider = state.email_provider.clone();
    tokio::spawn(
        async move {
            match provider.send(&notification).await {
                Ok(receipt) => {
                    record_email("notification", "sent");
                    tracing::info!(
                        provider_id = ?receipt.provider_id,
                        "Owner notification sent"
                    );
                }
                Err(e) => {
                    record_email("notification", "failed");
                    tracing::error!(error = %e, "Failed to send owner notification");
                }
            }
        }
        .in_current_span(),
    );

    match state.email_provider.send(&acknowledgment).await {
        Ok(receipt) => {
            record_email("acknowledgment", "sent");
            tracing::info!(
                to = %submission.email,
                provider_id = ?receipt.provider_id,
                "Acknowledgment sent"
            );
            Ok(())
        }
        Err(e) => {
            record_email("acknowledgment", "failed");
            tracing::error!(to = %submission.email, error = %e, "Failed to send acknowledgment");
            Err(ContactError::Delivery(e))
        }
    }
}
