use crate::core::error::SessionError;

/// Lifecycle of the single outbound call a session may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformPhase {
    #[default]
    Idle,
    InFlight,
}

impl TransformPhase {
    pub fn begin(self) -> Result<Self, SessionError> {
        match self {
            TransformPhase::Idle => Ok(TransformPhase::InFlight),
            TransformPhase::InFlight => Err(SessionError::Busy),
        }
    }

    pub fn finish(self) -> Self {
        TransformPhase::Idle
    }

    pub fn is_busy(self) -> bool {
        self == TransformPhase::InFlight
    }
}
