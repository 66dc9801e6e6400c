use std::sync::Arc;

use axum::{
    extract::Path,
    http::header,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Extension, Form, Router,
};
use cyify_llm::ApiKey;
use serde::Deserialize;
use uuid::Uuid;

use super::session_state::SessionAction;
use super::session_view::{self, DOWNLOAD_FILE_NAME};
use crate::app_module::AppState;
use crate::core::error::{SessionError, TransformError};

#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

// No Debug: the field is a secret.
#[derive(Deserialize)]
pub struct CredentialForm {
    #[serde(default)]
    pub api_key: String,
}

pub fn session_router() -> Router {
    Router::new()
        .route("/", get(create_session))
        .route("/sessions/:session_id", get(show_session))
        .route("/sessions/:session_id/input", post(update_input))
        .route("/sessions/:session_id/clear", post(clear_session))
        .route("/sessions/:session_id/transform", post(transform_text))
        .route("/sessions/:session_id/credential", post(enter_credential))
        .route("/sessions/:session_id/download", get(download_text))
}

fn back_to(session_id: Uuid) -> Redirect {
    Redirect::to(&session_view::page_path(session_id))
}

pub async fn create_session(Extension(ctx): Extension<AppState>) -> Redirect {
    let credential = ctx.credentials.resolve();
    let session_id = ctx.sessions.create(credential);

    back_to(session_id)
}

pub async fn show_session(
    Extension(ctx): Extension<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Html<String>, SessionError> {
    let state = ctx.sessions.get(session_id)?.snapshot();

    Ok(Html(session_view::render_page(session_id, &state)))
}

pub async fn update_input(
    Extension(ctx): Extension<AppState>,
    Path(session_id): Path<Uuid>,
    Form(form): Form<TextForm>,
) -> Result<Redirect, SessionError> {
    ctx.sessions
        .get(session_id)?
        .dispatch(SessionAction::InputChanged(form.text));

    Ok(back_to(session_id))
}

pub async fn clear_session(
    Extension(ctx): Extension<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Redirect, SessionError> {
    ctx.sessions.get(session_id)?.dispatch(SessionAction::Clear);
    tracing::debug!(session_id = %session_id, "Session cleared");

    Ok(back_to(session_id))
}

pub async fn enter_credential(
    Extension(ctx): Extension<AppState>,
    Path(session_id): Path<Uuid>,
    Form(form): Form<CredentialForm>,
) -> Result<Redirect, SessionError> {
    let api_key = ApiKey::from_input(&form.api_key);
    tracing::debug!(
        session_id = %session_id,
        provided = api_key.is_some(),
        "API key entered"
    );

    ctx.sessions
        .get(session_id)?
        .dispatch(SessionAction::CredentialEntered(api_key));

    Ok(back_to(session_id))
}

/// Records the submitted text, then runs one transform for the session. The
/// session lock is not held while the model is working.
///
/// The call and the write-back run on their own task so a client that goes
/// away mid-request cannot leave the session in flight.
pub async fn transform_text(
    Extension(ctx): Extension<AppState>,
    Path(session_id): Path<Uuid>,
    Form(form): Form<TextForm>,
) -> Result<Redirect, SessionError> {
    let session = ctx.sessions.get(session_id)?;
    session.dispatch(SessionAction::InputChanged(form.text));

    let Some(job) = session.begin_transform() else {
        tracing::warn!(session_id = %session_id, "Transform rejected, one is already running");
        return Ok(back_to(session_id));
    };

    tracing::info!(
        session_id = %session_id,
        input_len = job.input_text.len(),
        "Transforming text"
    );

    let service = ctx.service.text_transformer_service.clone();
    let task_session = Arc::clone(&session);
    let task = tokio::spawn(async move {
        let outcome = service.transform(&job.input_text, job.api_key.as_ref()).await;
        task_session.dispatch(outcome_action(session_id, outcome));
    });

    if let Err(e) = task.await {
        tracing::error!(session_id = %session_id, "Transform task aborted: {}", e);
        session.dispatch(SessionAction::TransformFailed(
            TransformError::ExternalServiceFailure("the transformation was interrupted".into()),
        ));
    }

    Ok(back_to(session_id))
}

fn outcome_action(session_id: Uuid, outcome: Result<String, TransformError>) -> SessionAction {
    match outcome {
        Ok(transformed_text) => {
            tracing::info!(
                session_id = %session_id,
                output_len = transformed_text.len(),
                "Transform succeeded"
            );
            SessionAction::TransformSucceeded(transformed_text)
        }
        Err(e) => {
            tracing::warn!(session_id = %session_id, "Transform failed: {}", e);
            SessionAction::TransformFailed(e)
        }
    }
}

pub async fn download_text(
    Extension(ctx): Extension<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, SessionError> {
    let state = ctx.sessions.get(session_id)?.snapshot();

    if state.transformed_text.is_empty() {
        return Err(SessionError::NothingToDownload);
    }

    let disposition = format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        state.transformed_text,
    ))
}
