use super::{frontmatter_arg, optional_str, required_str};
use crate::server::Server;
use serde_json::{json, Value};
use std::sync::Arc;

/// Execute the `create_note` tool: write a new note named after its title.
pub fn execute(server: &Arc<Server>, arguments: &Value) -> Result<Value, String> {
    let title = required_str(arguments, "title")?;
    let content = required_str(arguments, "content")?;
    let folder = optional_str(arguments, "folder")?;
    let frontmatter = frontmatter_arg(arguments.get("frontmatter"), "frontmatter")?;

    let path = server
        .vault()
        .create_note(title, content, folder, frontmatter.as_ref())
        .map_err(|e| e.to_string())?;

    Ok(json!({
        "success": true,
        "path": path,
        "title": title,
    }))
}
