use super::{count_or_default, optional_str, required_str};
use crate::server::Server;
use serde_json::{json, Value};
use std::sync::Arc;
use vault_core::search::{search, SearchQuery, DEFAULT_SEARCH_LIMIT};

/// Execute the `search_notes` tool: filter notes by title/path, tag and folder.
pub fn execute(server: &Arc<Server>, arguments: &Value) -> Result<Value, String> {
    let query = required_str(arguments, "query")?;
    let tag = optional_str(arguments, "tag")?;
    let folder = optional_str(arguments, "folder")?;
    let limit = count_or_default(arguments, "limit", DEFAULT_SEARCH_LIMIT)?;

    let index = server.vault().index().map_err(|e| e.to_string())?;
    let results = search(
        &index,
        &SearchQuery {
            query,
            tag,
            folder,
            limit,
        },
    );

    Ok(json!({
        "count": results.len(),
        "results": results,
    }))
}
