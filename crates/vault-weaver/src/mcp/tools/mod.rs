pub mod create_graph;
pub mod create_note;
pub mod get_backlinks;
pub mod search_notes;
pub mod update_frontmatter;

use crate::server::Server;
use serde_json::{json, Value};
use std::sync::Arc;
use vault_core::Frontmatter;

/// Tool catalogue returned by `tools/list`.
pub fn definitions() -> Value {
    json!([
        {
            "name": "create_note",
            "description": "Create a new note in the Obsidian vault",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Note title (will be used as filename)"
                    },
                    "content": {
                        "type": "string",
                        "description": "Note content (markdown)"
                    },
                    "folder": {
                        "type": "string",
                        "description": "Folder path relative to vault root (optional)"
                    },
                    "frontmatter": {
                        "type": "object",
                        "description": "YAML frontmatter metadata (optional)"
                    }
                },
                "required": ["title", "content"]
            }
        },
        {
            "name": "search_notes",
            "description": "Search notes by title or path, optionally filtered by tag and folder",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Case-insensitive text matched against note titles and paths"
                    },
                    "tag": {
                        "type": "string",
                        "description": "Filter by tag, without the leading # (optional)"
                    },
                    "folder": {
                        "type": "string",
                        "description": "Filter by folder path prefix (optional)"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of results (default: 10)",
                        "minimum": 1,
                        "maximum": 100
                    }
                },
                "required": ["query"]
            }
        },
        {
            "name": "get_backlinks",
            "description": "Get all notes that link to a specific note",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "notePath": {
                        "type": "string",
                        "description": "Path to the note (relative to vault root)"
                    }
                },
                "required": ["notePath"]
            }
        },
        {
            "name": "create_graph",
            "description": "Generate a graph of note connections",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "rootNote": {
                        "type": "string",
                        "description": "Start from this note path (optional, defaults to the first 50 notes)"
                    },
                    "depth": {
                        "type": "number",
                        "description": "Maximum depth to traverse (default: 2)",
                        "minimum": 1,
                        "maximum": 5
                    }
                }
            }
        },
        {
            "name": "update_frontmatter",
            "description": "Update or add frontmatter to a note",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "notePath": {
                        "type": "string",
                        "description": "Path to the note (relative to vault root)"
                    },
                    "frontmatter": {
                        "type": "object",
                        "description": "Frontmatter fields to update/add"
                    },
                    "merge": {
                        "type": "boolean",
                        "description": "Merge with existing frontmatter (default: true)"
                    }
                },
                "required": ["notePath", "frontmatter"]
            }
        }
    ])
}

/// Run the named tool. `Err` carries the message for the `{error}` result.
pub fn call(server: &Arc<Server>, name: &str, arguments: &Value) -> Result<Value, String> {
    match name {
        "create_note" => create_note::execute(server, arguments),
        "search_notes" => search_notes::execute(server, arguments),
        "get_backlinks" => get_backlinks::execute(server, arguments),
        "create_graph" => create_graph::execute(server, arguments),
        "update_frontmatter" => update_frontmatter::execute(server, arguments),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}

pub(crate) fn required_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, String> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing required parameter: {}", key))
}

pub(crate) fn optional_str<'a>(arguments: &'a Value, key: &str) -> Result<Option<&'a str>, String> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(format!("Parameter {} must be a string", key)),
    }
}

/// Non-negative integer argument; fractions are truncated.
pub(crate) fn optional_count(arguments: &Value, key: &str) -> Result<Option<usize>, String> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                Ok(Some(usize::try_from(u).unwrap_or(usize::MAX)))
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                Ok(Some(if f > 0.0 { f as usize } else { 0 }))
            }
        }
        Some(_) => Err(format!("Parameter {} must be a number", key)),
    }
}

/// Count argument where a missing, zero or negative value means `default`.
pub(crate) fn count_or_default(arguments: &Value, key: &str, default: usize) -> Result<usize, String> {
    Ok(optional_count(arguments, key)?
        .filter(|&n| n > 0)
        .unwrap_or(default))
}

pub(crate) fn frontmatter_arg(value: Option<&Value>, key: &str) -> Result<Option<Frontmatter>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map.clone())),
        Some(_) => Err(format!("Parameter {} must be an object", key)),
    }
}
