//! Client-side call types

use std::{collections::HashMap, time::Duration};

use crate::{layer::auth::AuthCredentials, protocol::operation::AgentOp};

/// A call to a remote agent
///
/// This wraps a capability operation with the context needed to execute it
#[derive(Debug, Clone)]
pub struct AgentCall {
    /// The operation to execute
    pub operation: AgentOp,

    /// Call context (auth, timeouts, metadata)
    pub context: CallContext,
}

impl AgentCall {
    /// Create a new agent call
    pub fn new(operation: AgentOp, context: CallContext) -> Self {
        Self { operation, context }
    }
}

/// Call context containing metadata and configuration
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Base URL of the target agent
    pub agent_url: String,

    /// Authentication credentials (if any)
    pub auth: Option<AuthCredentials>,

    /// Call timeout
    pub timeout: Option<Duration>,

    /// Additional metadata headers
    pub metadata: HashMap<String, String>,
}

impl CallContext {
    /// Create a new call context
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            auth: None,
            timeout: Some(Duration::from_secs(30)),
            metadata: HashMap::new(),
        }
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, auth: AuthCredentials) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a metadata header
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self {
            agent_url: String::new(),
            auth: None,
            timeout: Some(Duration::from_secs(30)),
            metadata: HashMap::new(),
        }
    }
}
