//! Protocol server: dispatch, configuration, task store, HTTP binding

pub mod config;
pub mod dispatch;
pub mod http;
pub mod store;

pub use config::ServerConfig;
pub use dispatch::A2aServer;
pub use http::serve;
pub use store::TaskStore;
