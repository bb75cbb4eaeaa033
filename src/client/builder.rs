//! Client builder for constructing agent clients

use std::{sync::Arc, time::Duration};

use url::Url;

use crate::{
    client::{AgentClient, ClientConfig},
    codec::{Codec, JsonCodec, JsonRpcCodec},
    layer::AuthCredentials,
    protocol::error::A2AError,
    service::CallService,
    transport::{HttpTransport, Transport},
};

/// Builder for constructing agent clients
///
/// One configuration object covers transport, codec, authentication,
/// timeout, and validation; [`AgentClientBuilder::new_http`] is the
/// shortcut for the common HTTP case.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_agent::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = "http://localhost:4100".parse().unwrap();
/// let mut client = AgentClientBuilder::new_http(url)
///     .with_bearer_auth("token123")
///     .with_timeout(Duration::from_secs(60))
///     .build()?;
///
/// let descriptor = client.discover().await?;
/// println!("Connected to: {}", descriptor.name);
/// # Ok(())
/// # }
/// ```
pub struct AgentClientBuilder<T: Transport> {
    agent_url: Url,
    transport: Option<T>,
    codec: Option<Arc<dyn Codec>>,
    auth: Option<AuthCredentials>,
    timeout: Option<Duration>,
    validate_requests: bool,
}

impl<T: Transport> AgentClientBuilder<T> {
    /// Create a builder with no transport configured yet
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url,
            transport: None,
            codec: None,
            auth: None,
            timeout: Some(Duration::from_secs(30)),
            validate_requests: true,
        }
    }

    /// Use a custom transport
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom codec
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Frame calls as JSON-RPC instead of the plain per-operation routes
    pub fn with_jsonrpc(mut self) -> Self {
        self.codec = Some(Arc::new(JsonRpcCodec::new()));
        self
    }

    /// Enable bearer token authentication
    pub fn with_bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::bearer(token));
        self
    }

    /// Enable API key authentication
    pub fn with_api_key_auth(mut self, key: impl Into<String>, header: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::api_key(key, header));
        self
    }

    /// Enable basic HTTP authentication
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthCredentials::basic(username, password));
        self
    }

    /// Set custom authentication credentials
    pub fn with_auth(mut self, credentials: AuthCredentials) -> Self {
        self.auth = Some(credentials);
        self
    }

    /// Set the call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable outbound validation
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_requests = enabled;
        self
    }

    /// Build the agent client
    ///
    /// # Errors
    ///
    /// Returns an error if no transport has been configured
    pub fn build(self) -> Result<AgentClient<CallService<T>>, A2AError> {
        let transport = self.transport.ok_or_else(|| {
            A2AError::Internal(
                "Transport not configured. Use new_http() or with_transport()".into(),
            )
        })?;

        let codec = self.codec.unwrap_or_else(|| Arc::new(JsonCodec));

        let service = CallService::new(transport, codec);

        let mut config = ClientConfig::new(self.agent_url)
            .with_timeout(self.timeout.unwrap_or(Duration::from_secs(30)))
            .with_validation(self.validate_requests);
        if let Some(auth) = self.auth {
            config = config.with_auth(auth);
        }

        Ok(AgentClient::new(service, config))
    }
}

impl AgentClientBuilder<HttpTransport> {
    /// Create a builder with HTTP transport and the plain JSON codec
    pub fn new_http(agent_url: Url) -> Self {
        let transport = HttpTransport::new(agent_url.clone());
        Self {
            agent_url,
            transport: Some(transport),
            codec: Some(Arc::new(JsonCodec)),
            auth: None,
            timeout: Some(Duration::from_secs(30)),
            validate_requests: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::transport::mock::MockTransport;

    use super::*;

    fn agent_url() -> Url {
        "http://localhost:4100".parse().unwrap()
    }

    #[test]
    fn test_builder_with_http() {
        let client = AgentClientBuilder::new_http(agent_url()).build();

        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_with_mock_transport() {
        let transport = MockTransport::ok();

        let client = AgentClientBuilder::new(agent_url())
            .with_transport(transport)
            .with_codec(Arc::new(JsonCodec))
            .build();

        assert!(client.is_ok());
    }

    #[test]
    fn test_builder_requires_transport() {
        let result = AgentClientBuilder::<MockTransport>::new(agent_url()).build();

        assert!(result.is_err());
    }

    #[test]
    fn test_builder_all_options() {
        let client = AgentClientBuilder::new_http(agent_url())
            .with_jsonrpc()
            .with_bearer_auth("token")
            .with_timeout(Duration::from_secs(45))
            .with_validation(true)
            .build()
            .unwrap();

        assert!(client.config().auth.is_some());
        assert_eq!(client.config().timeout, Duration::from_secs(45));
    }
}
