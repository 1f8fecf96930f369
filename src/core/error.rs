use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcanumError {
    #[error("Class {class} not held by agent {agent:?}")]
    ClassNotHeld {
        agent: crate::core::types::AgentId,
        class: crate::core::types::ClassId,
    },

    #[error("Extension pack error in {path}: {message}")]
    PackParse { path: String, message: String },

    #[error("Extension pack validation failed: {}", .0.join(", "))]
    PackValidation(Vec<String>),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArcanumError>;
