//! Error types for A2A protocol operations

use thiserror::Error;

use super::task::TaskState;

/// Main error type for A2A protocol operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Request body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Envelope was structurally invalid (wrong version, missing method, bad id type)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No operation is registered under the requested method name
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Parameters did not match the shape the operation expects
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Message failed data-model validation
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// Requested task state change is not an edge of the lifecycle
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: TaskState, to: TaskState },

    /// Operation is not permitted while the task is in its current state
    #[error("Invalid state: {operation} not permitted while {state}")]
    InvalidState {
        state: TaskState,
        operation: &'static str,
    },

    /// No task is registered under the given id
    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Anything that went wrong inside an agent's own logic
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON-RPC 2.0 error codes used on the wire
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Application codes live in the implementation-defined server band,
    // outside the reserved -32700..-32600 range.
    pub const TASK_NOT_FOUND: i64 = -32001;
    pub const MALFORMED_MESSAGE: i64 = -32002;
    pub const INVALID_TRANSITION: i64 = -32003;
    pub const INVALID_STATE: i64 = -32004;
}

impl A2AError {
    /// The JSON-RPC error code this variant maps to on the wire
    pub fn error_code(&self) -> i64 {
        match self {
            A2AError::Parse(_) => codes::PARSE_ERROR,
            A2AError::InvalidRequest(_) => codes::INVALID_REQUEST,
            A2AError::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            A2AError::InvalidParams(_) => codes::INVALID_PARAMS,
            A2AError::MalformedMessage(_) => codes::MALFORMED_MESSAGE,
            A2AError::InvalidTransition { .. } => codes::INVALID_TRANSITION,
            A2AError::InvalidState { .. } => codes::INVALID_STATE,
            A2AError::TaskNotFound { .. } => codes::TASK_NOT_FOUND,
            A2AError::Transport(_) | A2AError::Serialization(_) | A2AError::Internal(_) => {
                codes::INTERNAL_ERROR
            }
        }
    }
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}

impl From<&str> for A2AError {
    fn from(s: &str) -> Self {
        A2AError::Internal(s.to_string())
    }
}

impl From<String> for A2AError {
    fn from(s: String) -> Self {
        A2AError::Internal(s)
    }
}
