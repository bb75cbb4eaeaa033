//! Serialization codecs for the protocol bindings

pub mod json;
pub mod jsonrpc;

pub use json::JsonCodec;
pub use jsonrpc::{JsonRpcCodec, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};

use crate::{
    protocol::{error::A2AError, operation::AgentOp},
    service::response::OpReply,
};
use bytes::Bytes;

/// Codec trait for encoding and decoding capability operations
///
/// Different codecs implement different protocol bindings: plain HTTP+JSON
/// or JSON-RPC 2.0 framing over the same routes.
pub trait Codec: Send + Sync {
    /// Serialize a capability operation to bytes for transport
    fn encode_request(&self, operation: &AgentOp) -> Result<Bytes, A2AError>;

    /// Deserialize transport response bytes to an operation reply
    ///
    /// The original operation is passed for context, since the reply shape
    /// depends on which operation was invoked.
    fn decode_reply(&self, body: &[u8], operation: &AgentOp) -> Result<OpReply, A2AError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;

    /// The single endpoint all requests go to when this codec frames them
    ///
    /// Plain bindings return `None` and use the per-operation routes;
    /// envelope bindings post every request to one path.
    fn rpc_endpoint(&self) -> Option<&str> {
        None
    }
}
