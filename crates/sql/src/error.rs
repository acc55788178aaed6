use thiserror::Error;

/// An error reported by the engine, carrying its raw result code and the
/// engine-provided diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("engine error {code}: {message}")]
pub struct EngineError {
    /// The engine's numeric result code.
    pub code: i32,
    /// The engine's diagnostic message for this failure.
    pub message: String,
}

impl EngineError {
    /// Creates an error from a result code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
