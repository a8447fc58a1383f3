use crate::errors::{DeribitError, Result};
use crate::models::{RpcRequest, RpcResponse};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Fixed per-action request ids. The client is single-flight, so these can
/// never collide in flight; they must become per-call unique if overlapping
/// requests are ever introduced.
pub mod request_id {
    pub const AUTH: u64 = 0;
    pub const BUY: u64 = 1;
    pub const CANCEL: u64 = 6;
    pub const EDIT: u64 = 11;
    pub const ORDER_BOOK: u64 = 15;
    pub const POSITION: u64 = 20;
    pub const OPEN_ORDERS: u64 = 25;
}

/// Build the JSON-RPC request envelope for one action
pub fn build_request(method: &str, params: Value, id: u64) -> RpcRequest {
    RpcRequest {
        jsonrpc: JSONRPC_VERSION,
        method: method.to_string(),
        params,
        id,
    }
}

/// Classify a raw response body per the JSON-RPC envelope.
///
/// - malformed JSON is a `ParseError`
/// - an `error` field means the venue rejected the request (`VenueError`,
///   payload carried verbatim)
/// - a `result` field is success, and the payload is handed back for the
///   handler to interpret
/// - neither field is a malformed envelope (`ProtocolError`), never silently
///   a success
pub fn classify(body: &str) -> Result<Value> {
    let response: RpcResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(DeribitError::VenueError(error));
    }

    match response.result {
        Some(result) => Ok(result),
        None => Err(DeribitError::ProtocolError(body.to_string())),
    }
}
