//! Protocol server configuration

use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

/// Environment variable selecting the listening port
pub const PORT_ENV_VAR: &str = "A2A_PORT";

/// Configuration for a protocol server
///
/// One configuration object covers everything per-agent server setup used
/// to duplicate: the listening address, the JSON-RPC endpoint path, and the
/// location of the agent card document.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Address to bind to
    pub bind_addr: IpAddr,

    /// Path of the JSON-RPC endpoint
    pub base_path: String,

    /// Location of the agent card document served at `/agent.json`
    pub card_path: PathBuf,
}

impl ServerConfig {
    /// Create a configuration listening on the given port
    pub fn new(port: u16) -> Self {
        Self {
            port,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            base_path: "/rpc".to_string(),
            card_path: PathBuf::from(".well-known/agent.json"),
        }
    }

    /// Create a configuration from the environment
    ///
    /// Reads the port from `A2A_PORT`, falling back to the agent-specific
    /// default when the variable is absent or unparseable.
    pub fn from_env(default_port: u16) -> Self {
        let port = env::var(PORT_ENV_VAR)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(default_port);

        Self::new(port)
    }

    /// Set the bind address
    pub fn with_bind_addr(mut self, addr: IpAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the JSON-RPC endpoint path
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Set the agent card location
    pub fn with_card_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.card_path = path.into();
        self
    }

    /// The socket address to listen on
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(8080)
    }
}
