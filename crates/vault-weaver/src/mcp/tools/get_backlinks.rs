use super::required_str;
use crate::server::Server;
use serde_json::{json, Value};
use std::sync::Arc;
use vault_core::link_graph;

/// Execute the `get_backlinks` tool: list the notes whose wikilinks point at a note.
pub fn execute(server: &Arc<Server>, arguments: &Value) -> Result<Value, String> {
    let note_path = required_str(arguments, "notePath")?;

    let index = server.vault().index().map_err(|e| e.to_string())?;
    let backlinks = link_graph::backlinks(&index, note_path);

    Ok(json!({
        "note": note_path,
        "backlinkCount": backlinks.len(),
        "backlinks": backlinks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::test_support::create_server;

    #[test]
    fn finds_title_path_and_aliased_links() {
        let (_dir, server) = create_server(&[
            ("A.md", "See [[B]]"),
            ("C.md", "See [[B.md]]"),
            ("D.md", "See [[B|See B]]"),
            ("E.md", "See [[Unrelated]]"),
            ("B.md", "target"),
        ]);
        let result = execute(&server, &json!({"notePath": "B.md"})).unwrap();

        assert_eq!(result["note"], "B.md");
        assert_eq!(result["backlinkCount"], 3);
        assert_eq!(
            result["backlinks"],
            json!([
                {"path": "A.md", "title": "A"},
                {"path": "C.md", "title": "C"},
                {"path": "D.md", "title": "D"}
            ])
        );
    }

    #[test]
    fn nested_note_matches_path_without_extension() {
        let (_dir, server) = create_server(&[
            ("index.md", "[[topics/Rust]]"),
            ("topics/Rust.md", "---\ntitle: The Rust Language\n---\n"),
        ]);
        let result = execute(&server, &json!({"notePath": "topics/Rust.md"})).unwrap();
        assert_eq!(result["backlinkCount"], 1);
        assert_eq!(result["backlinks"][0]["path"], "index.md");
    }

    #[test]
    fn no_backlinks_gives_empty_list() {
        let (_dir, server) = create_server(&[("lonely.md", "nobody links here")]);
        let result = execute(&server, &json!({"notePath": "lonely.md"})).unwrap();
        assert_eq!(result["backlinkCount"], 0);
        assert_eq!(result["backlinks"], json!([]));
    }

    #[test]
    fn missing_note_path_is_an_error() {
        let (_dir, server) = create_server(&[]);
        let err = execute(&server, &json!({})).unwrap_err();
        assert_eq!(err, "Missing required parameter: notePath");
    }
}
