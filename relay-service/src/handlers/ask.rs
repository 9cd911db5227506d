use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::question::{NO_ANSWER_FALLBACK, QUESTION_REQUIRED, SOMETHING_WENT_WRONG};
use crate::models::{AnswerReply, ErrorReply, QuestionRequest};
use crate::services::{prompt, record_provider_call, record_question, ProviderError};
use crate::startup::AppState;

#[derive(Debug, Error)]
pub enum AskError {
    #[error("question is missing or empty")]
    MissingQuestion,

    #[error("answer provider failed: {0}")]
    Provider(#[from] ProviderError),
}

impl From<ValidationErrors> for AskError {
    fn from(_: ValidationErrors) -> Self {
        AskError::MissingQuestion
    }
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AskError::MissingQuestion => (StatusCode::BAD_REQUEST, QUESTION_REQUIRED),
            AskError::Provider(_) => (StatusCode::INTERNAL_SERVER_ERROR, SOMETHING_WENT_WRONG),
        };

        (
            status,
            Json(ErrorReply {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}

/// Answer a visitor question from the personal information document.
#[tracing::instrument(skip(state, payload))]
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<AnswerReply>, AskError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected unreadable question");
            record_question("missing_question");
            return Err(AskError::MissingQuestion);
        }
    };

    request.validate().map_err(|errors| {
        record_question("missing_question");
        AskError::from(errors)
    })?;
    let question = request.question.as_str();

    let history = request.history();
    let prompt = prompt::build_prompt(&state.personal_info, &history, question);

    let generated = state
        .answer_provider
        .generate(&prompt)
        .await
        .map_err(|e| {
            record_provider_call("gemini", e.kind());
            record_question("provider_error");
            tracing::error!(error = %e, "Answer provider request failed");
            e
        })?;

    record_provider_call("gemini", "ok");
    tracing::info!(
        question_len = question.len(),
        history_len = history.len(),
        finish_reason = ?generated.finish_reason,
        input_tokens = ?generated.input_tokens,
        output_tokens = ?generated.output_tokens,
        "Answer generated"
    );

    let answer = match generated.text.filter(|text| !text.trim().is_empty()) {
        Some(text) => {
            record_question("answered");
            text
        }
        None => {
            record_question("no_answer");
            NO_ANSWER_FALLBACK.to_string()
        }
    };

    Ok(Json(AnswerReply { answer }))
}
