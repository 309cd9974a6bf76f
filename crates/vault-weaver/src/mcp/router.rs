use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use super::jsonrpc::{
    error_response, success_response, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND,
};
use super::tools;
use crate::server::Server;

/// Protocol version answered when the client does not ask for one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-03-26";
pub const SERVER_NAME: &str = "vault-weaver";

/// Dispatch a JSON-RPC request to the appropriate handler.
pub fn dispatch_request(server: &Arc<Server>, request: &JsonRpcRequest) -> JsonRpcResponse {
    let id = request.id.clone();
    match request.method.as_str() {
        "initialize" => handle_initialize(id, request.params.as_ref()),
        "ping" => handle_ping(id),
        "tools/list" => handle_tools_list(id),
        "tools/call" => handle_tools_call(server, id, request.params.as_ref()),
        other => error_response(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
    }
}

/// Handle a JSON-RPC notification (no response expected).
pub fn handle_notification(_server: &Arc<Server>, notification: &JsonRpcNotification) {
    match notification.method.as_str() {
        "notifications/initialized" => debug!("Client finished initialization"),
        "notifications/cancelled" => {
            // Requests run to completion before the next line is read, so
            // there is never anything in flight to cancel.
        }
        other => debug!("Ignoring notification: {}", other),
    }
}

fn handle_initialize(id: Value, params: Option<&Value>) -> JsonRpcResponse {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    if let Some(client) = params.and_then(|p| p.get("clientInfo")) {
        debug!("Initialize from client: {}", client);
    }

    success_response(
        id,
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_ping(id: Value) -> JsonRpcResponse {
    success_response(id, json!({}))
}

fn handle_tools_list(id: Value) -> JsonRpcResponse {
    success_response(id, json!({ "tools": tools::definitions() }))
}

fn handle_tools_call(server: &Arc<Server>, id: Value, params: Option<&Value>) -> JsonRpcResponse {
    let Some(params) = params else {
        return error_response(id, INVALID_PARAMS, "Missing params");
    };
    let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
        return error_response(id, INVALID_PARAMS, "Missing tool name");
    };
    let Some(arguments) = params.get("arguments") else {
        return error_response(id, INVALID_PARAMS, "Missing arguments");
    };

    debug!("Calling tool {}", name);
    let (payload, is_error) = match tools::call(server, name, arguments) {
        Ok(result) => (result, false),
        Err(message) => {
            tracing::warn!("Tool {} failed: {}", name, message);
            (json!({ "error": message }), true)
        }
    };

    match serde_json::to_string_pretty(&payload) {
        Ok(text) => success_response(
            id,
            json!({
                "content": [{ "type": "text", "text": text }],
                "isError": is_error
            }),
        ),
        Err(e) => error_response(id, INTERNAL_ERROR, format!("Failed to encode tool result: {}", e)),
    }
}
