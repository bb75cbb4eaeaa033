//! JSON-RPC 2.0 envelope codec
//!
//! The envelope has two halves. The server half decodes inbound request
//! envelopes ([`decode_request`]) and builds response envelopes whose
//! `result`/`error` exclusivity is enforced by construction. The client half
//! ([`JsonRpcCodec`]) wraps capability operations in request envelopes and
//! unwraps their responses.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    codec::Codec,
    protocol::{
        error::{codes, A2AError},
        operation::AgentOp,
    },
    service::response::OpReply,
};

use super::json::JsonCodec;

/// Protocol version string carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request identifier
///
/// Only strings, integers, and null are allowed; any other type makes the
/// whole envelope an invalid request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric id
    Number(i64),

    /// String id
    String(String),

    /// Explicitly null id (or absent in the request)
    Null,
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,

    /// Name of the operation to invoke
    pub method: String,

    /// Operation parameters; structured (object or array) when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Request id, echoed verbatim in the response
    #[serde(default = "null_id")]
    pub id: RequestId,
}

fn null_id() -> RequestId {
    RequestId::Null
}

impl JsonRpcRequest {
    /// Build a request with a generated id
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: RequestId::String(Uuid::now_v7().to_string()),
        }
    }
}

/// Decode a raw request body into a JSON-RPC request envelope
///
/// Fails with `Parse` (-32700) when the body is not JSON, and with
/// `InvalidRequest` (-32600) when the envelope is structurally wrong:
/// version mismatch, missing method, non-structured params, or an id of a
/// disallowed type.
pub fn decode_request(raw: &[u8]) -> Result<JsonRpcRequest, A2AError> {
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| A2AError::Parse(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| A2AError::InvalidRequest("request must be a JSON object".into()))?;

    match obj.get("jsonrpc").and_then(Value::as_str) {
        Some(JSONRPC_VERSION) => {}
        _ => {
            return Err(A2AError::InvalidRequest(
                "jsonrpc version must be \"2.0\"".into(),
            ))
        }
    }

    let method = obj
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| A2AError::InvalidRequest("method is missing or not a string".into()))?
        .to_string();

    let params = match obj.get("params") {
        None | Some(Value::Null) => None,
        Some(p @ Value::Object(_)) | Some(p @ Value::Array(_)) => Some(p.clone()),
        Some(_) => {
            return Err(A2AError::InvalidRequest(
                "params must be structured (object or array)".into(),
            ))
        }
    };

    let id = match obj.get("id") {
        None | Some(Value::Null) => RequestId::Null,
        Some(Value::String(s)) => RequestId::String(s.clone()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => RequestId::Number(i),
            None => {
                return Err(A2AError::InvalidRequest(
                    "id must be an integer when numeric".into(),
                ))
            }
        },
        Some(_) => return Err(A2AError::InvalidRequest("id is of a disallowed type".into())),
    };

    Ok(JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION.to_string(),
        method,
        params,
        id,
    })
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Create an error object
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attach structured error details
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<&A2AError> for JsonRpcError {
    fn from(err: &A2AError) -> Self {
        Self::new(err.error_code(), err.to_string())
    }
}

/// Map a wire error code back onto the protocol error taxonomy
pub(crate) fn error_from_code(code: i64, message: String) -> A2AError {
    match code {
        codes::PARSE_ERROR => A2AError::Parse(message),
        codes::INVALID_REQUEST => A2AError::InvalidRequest(message),
        codes::METHOD_NOT_FOUND => A2AError::MethodNotFound(message),
        codes::INVALID_PARAMS => A2AError::InvalidParams(message),
        codes::MALFORMED_MESSAGE => A2AError::MalformedMessage(message),
        _ => A2AError::Internal(format!("JSON-RPC error {}: {}", code, message)),
    }
}

/// JSON-RPC 2.0 response envelope
///
/// A response carries exactly one of `result`/`error`. The fields are
/// private and the only constructors are [`JsonRpcResponse::result`] and
/// [`JsonRpcResponse::error`], so a response with both or neither cannot be
/// built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    jsonrpc: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,

    id: RequestId,
}

impl JsonRpcResponse {
    /// Build a success response
    pub fn result(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Build an error response
    pub fn error(id: RequestId, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Build an error response straight from a protocol error
    pub fn from_error(id: RequestId, err: &A2AError) -> Self {
        Self::error(id, JsonRpcError::from(err))
    }

    /// The id echoed from the request
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    /// The result payload, when this is a success response
    pub fn result_value(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// The error object, when this is an error response
    pub fn error_object(&self) -> Option<&JsonRpcError> {
        self.error.as_ref()
    }

    /// Whether this is a success response
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// Serialize the envelope to bytes
    pub fn encode(&self) -> Result<Bytes, A2AError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(Bytes::from(bytes))
    }

    /// Parse a response envelope, checking the result/error exclusivity
    pub fn decode(raw: &[u8]) -> Result<Self, A2AError> {
        let response: JsonRpcResponse =
            serde_json::from_slice(raw).map_err(|e| A2AError::Parse(e.to_string()))?;

        match (&response.result, &response.error) {
            (Some(_), Some(_)) => Err(A2AError::InvalidRequest(
                "response carries both result and error".into(),
            )),
            (None, None) => Err(A2AError::InvalidRequest(
                "response carries neither result nor error".into(),
            )),
            _ => Ok(response),
        }
    }
}

/// JSON-RPC 2.0 codec for the client side
///
/// Wraps capability operations in request envelopes and unwraps response
/// envelopes, delegating payload decoding to the inner JSON codec.
#[derive(Debug, Clone)]
pub struct JsonRpcCodec {
    inner: JsonCodec,
    base_path: String,
}

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec posting to the default `/rpc` path
    pub fn new() -> Self {
        Self {
            inner: JsonCodec::new(),
            base_path: "/rpc".to_string(),
        }
    }

    /// Set the endpoint path requests are posted to
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }
}

impl Default for JsonRpcCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonRpcCodec {
    fn encode_request(&self, operation: &AgentOp) -> Result<Bytes, A2AError> {
        let params_bytes = self.inner.encode_request(operation)?;
        let params: Value = serde_json::from_slice(&params_bytes)?;

        // GET-shaped operations carry no params
        let params = match &params {
            Value::Object(map) if map.is_empty() => None,
            _ => Some(params),
        };

        let request = JsonRpcRequest::new(operation.rpc_method(), params);
        let bytes = serde_json::to_vec(&request)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_reply(&self, body: &[u8], operation: &AgentOp) -> Result<OpReply, A2AError> {
        let response = JsonRpcResponse::decode(body)?;

        if let Some(error) = response.error_object() {
            return Err(error_from_code(error.code, error.message.clone()));
        }

        // decode() guarantees a result is present when there is no error
        let result = response
            .result_value()
            .ok_or_else(|| A2AError::Internal("response missing 'result' field".into()))?;

        let result_bytes = serde_json::to_vec(result)?;
        self.inner.decode_reply(&result_bytes, operation)
    }

    fn content_type(&self) -> &str {
        "application/a2a+json"
    }

    fn rpc_endpoint(&self) -> Option<&str> {
        Some(&self.base_path)
    }
}
