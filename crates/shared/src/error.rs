use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    Rejected,
    Internal,
}

/// Fault raised by a transformation engine. Never produced by the form core itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct EngineError {
    pub kind: FaultKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Rejected, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Internal, message)
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("transformation failed, output left unchanged: {0}")]
    Engine(#[from] EngineError),
}

impl FormError {
    pub fn engine(&self) -> &EngineError {
        match self {
            Self::Engine(err) => err,
        }
    }
}

/// Serializable view of a fault, for front ends that print machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultReport {
    pub kind: FaultKind,
    pub message: String,
}

impl From<&FormError> for FaultReport {
    fn from(value: &FormError) -> Self {
        let err = value.engine();
        Self {
            kind: err.kind,
            message: err.message.clone(),
        }
    }
}
