use cyify_llm::ApiKey;

use crate::core::error::{SessionError, TransformError};
use crate::core::state_machine::TransformPhase;
use crate::credentials::{CredentialSource, ResolvedCredential};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything one browser session sees on the page.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub input_text: String,
    pub transformed_text: String,
    pub credential: ResolvedCredential,
    pub phase: TransformPhase,
    pub notice: Option<Notice>,
}

#[derive(Debug)]
pub enum SessionAction {
    InputChanged(String),
    Clear,
    CredentialEntered(Option<ApiKey>),
    TransformStarted,
    TransformSucceeded(String),
    TransformFailed(TransformError),
}

impl SessionState {
    pub fn new(credential: ResolvedCredential) -> Self {
        Self {
            credential,
            ..Self::default()
        }
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.credential.api_key.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Applies one user or transform action and returns the next state.
    /// While a transform is in flight only its completion is accepted.
    pub fn reduce(self, action: SessionAction) -> Self {
        match action {
            SessionAction::TransformSucceeded(transformed_text) => Self {
                transformed_text,
                phase: self.phase.finish(),
                notice: None,
                ..self
            },
            SessionAction::TransformFailed(error) => {
                let notice = if error.is_warning() {
                    Notice::warning(error.to_string())
                } else {
                    Notice::error(error.to_string())
                };

                Self {
                    phase: self.phase.finish(),
                    notice: Some(notice),
                    ..self
                }
            }
            _ if self.is_busy() => Self {
                notice: Some(Notice::warning(SessionError::Busy.to_string())),
                ..self
            },
            SessionAction::InputChanged(input_text) => Self {
                input_text,
                notice: None,
                ..self
            },
            SessionAction::Clear => Self {
                input_text: String::new(),
                transformed_text: String::new(),
                notice: None,
                ..self
            },
            SessionAction::CredentialEntered(api_key) => {
                if self.credential.source != CredentialSource::UserEntry {
                    return self;
                }

                Self {
                    credential: ResolvedCredential {
                        source: CredentialSource::UserEntry,
                        api_key,
                    },
                    notice: None,
                    ..self
                }
            }
            SessionAction::TransformStarted => match self.phase.begin() {
                Ok(phase) => Self {
                    phase,
                    notice: None,
                    ..self
                },
                Err(error) => Self {
                    notice: Some(Notice::warning(error.to_string())),
                    ..self
                },
            },
        }
    }
}
