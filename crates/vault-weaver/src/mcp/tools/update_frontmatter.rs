use super::{frontmatter_arg, required_str};
use crate::server::Server;
use serde_json::{json, Value};
use std::sync::Arc;

/// Execute the `update_frontmatter` tool: merge fields into (or replace) a
/// note's frontmatter, keeping its body.
pub fn execute(server: &Arc<Server>, arguments: &Value) -> Result<Value, String> {
    let note_path = required_str(arguments, "notePath")?;
    let fields = frontmatter_arg(arguments.get("frontmatter"), "frontmatter")?
        .ok_or_else(|| "Missing required parameter: frontmatter".to_string())?;
    // Anything but an explicit `false` merges.
    let merge = arguments.get("merge").and_then(|v| v.as_bool()) != Some(false);

    let frontmatter = server
        .vault()
        .update_frontmatter(note_path, fields, merge)
        .map_err(|e| e.to_string())?;

    Ok(json!({
        "success": true,
        "path": note_path,
        "frontmatter": frontmatter,
    }))
}
