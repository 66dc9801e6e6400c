use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::*;
use crate::session::session_view;

impl From<anyhow::Error> for TransformError {
    fn from(err: anyhow::Error) -> Self {
        TransformError::ExternalServiceFailure(format!("{:#}", err))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            SessionError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Html(session_view::render_not_found())).into_response()
            }
            SessionError::Busy => (StatusCode::CONFLICT, self.to_string()).into_response(),
            SessionError::NothingToDownload => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
        }
    }
}
