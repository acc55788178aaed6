use silt_sql::{EngineError, Statement, Value};
use thiserror::Error;

/// Errors surfaced by the fetch pipeline.
///
/// Engine-layer failures propagate with their structure intact (result code,
/// diagnostic message, SQL text, bound arguments); nothing is retried or
/// swallowed. Records already yielded before a failure remain valid.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Schema metadata lookup failed, most commonly because the table does
    /// not exist.
    #[error("schema lookup failed for table \"{table}\": {message}")]
    Schema {
        /// The table whose metadata was requested.
        table: String,
        /// The engine's diagnostic message.
        message: String,
    },

    /// The engine reported a non-success result code while preparing or
    /// stepping a statement.
    #[error("engine error {code}: {message} (sql: `{sql}`, arguments: {arguments:?})")]
    Execute {
        /// The engine's numeric result code.
        code: i32,
        /// The engine's diagnostic message.
        message: String,
        /// SQL text of the failing statement.
        sql: String,
        /// Arguments bound to the failing statement.
        arguments: Vec<Value>,
    },

    /// A row could not be decoded into the requested record type.
    #[error("row decoding failed: {0}")]
    Decode(anyhow::Error),

    /// A request argument could not be converted to an engine value.
    #[error("invalid request argument: {message}")]
    Argument {
        /// What was wrong with the argument.
        message: String,
    },
}

impl FetchError {
    pub(crate) fn execute<S: Statement + ?Sized>(error: EngineError, statement: &S) -> Self {
        Self::Execute {
            code: error.code,
            message: error.message,
            sql: statement.sql().to_owned(),
            arguments: statement.arguments().to_vec(),
        }
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }
}
