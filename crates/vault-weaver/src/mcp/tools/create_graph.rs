use super::{count_or_default, optional_str};
use crate::server::Server;
use serde_json::{json, Value};
use std::sync::Arc;
use vault_core::link_graph::{self, DEFAULT_GRAPH_DEPTH};

/// Execute the `create_graph` tool: depth-limited wikilink graph from a root
/// note, or from the first notes of the vault when no root is given.
pub fn execute(server: &Arc<Server>, arguments: &Value) -> Result<Value, String> {
    let root_note = optional_str(arguments, "rootNote")?;
    let depth = count_or_default(arguments, "depth", DEFAULT_GRAPH_DEPTH)?;

    let index = server.vault().index().map_err(|e| e.to_string())?;
    let nodes = link_graph::build_graph(&index, root_note, depth);

    Ok(json!({
        "nodeCount": nodes.len(),
        "nodes": nodes,
    }))
}
