use crate::doc_resolver;
use crate::error::{Result, VaultError};
use crate::frontmatter::{self, Frontmatter, FrontmatterError};
use crate::link_parser::{extract_tags, extract_wikilinks};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// File extension (with dot) of the files treated as notes.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// One markdown file in the vault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// Vault-relative path with `/` separators, e.g. `projects/Alpha.md`.
    pub path: String,
    pub title: String,
    pub frontmatter: Frontmatter,
    /// Wikilink targets from the raw text, duplicates kept.
    pub links: Vec<String>,
    /// Hash-tags from the raw text, duplicates kept.
    pub tags: Vec<String>,
}

impl Note {
    /// Build a note from its vault-relative path and raw file content.
    ///
    /// Links and tags come from the raw content, frontmatter included. A
    /// leading block that parses to a scalar or a list (a `---` rule around
    /// prose, say) yields empty frontmatter; only invalid YAML is an error.
    pub fn parse(path: impl Into<String>, raw: &str) -> Result<Self, FrontmatterError> {
        let path = path.into();
        let frontmatter = match frontmatter::parse(raw) {
            Ok((frontmatter, _body)) => frontmatter,
            Err(FrontmatterError::NotAMapping) => Frontmatter::new(),
            Err(err) => return Err(err),
        };
        let title = title_from_frontmatter(&frontmatter)
            .unwrap_or_else(|| doc_resolver::title_for_path(&path).to_string());

        Ok(Note {
            links: extract_wikilinks(raw),
            tags: extract_tags(raw),
            path,
            title,
            frontmatter,
        })
    }
}

fn title_from_frontmatter(frontmatter: &Frontmatter) -> Option<String> {
    match frontmatter.get("title")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Snapshot of every note in a vault, in scan order.
///
/// Built from scratch for each operation; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    notes: Vec<Note>,
}

impl NoteIndex {
    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Walk `root` and parse every markdown file under it.
    ///
    /// Hidden directories are skipped. Entries are visited depth-first in
    /// file-name order. A file that cannot be read or parsed is logged and
    /// left out; only a failure to open the root itself is an error.
    pub fn scan(root: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(root).map_err(|e| VaultError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(VaultError::io(
                root,
                std::io::Error::other("vault root is not a directory"),
            ));
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden_dir(entry));

        let mut notes = Vec::new();
        let mut skipped = 0usize;

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(VaultError::io(root, err.into()));
                }
                Err(err) => {
                    tracing::warn!("Skipping unreadable vault entry: {}", err);
                    skipped += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() || !is_markdown(&entry) {
                continue;
            }

            match load_note(root, &entry) {
                Ok(note) => notes.push(note),
                Err(err) => {
                    tracing::warn!("Error reading note {}: {}", entry.path().display(), err);
                    skipped += 1;
                }
            }
        }

        tracing::debug!(
            "Scanned {} notes under {} ({} skipped)",
            notes.len(),
            root.display(),
            skipped
        );

        Ok(Self { notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// First note whose path equals `path` exactly.
    pub fn get(&self, path: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.path == path)
    }
}

impl<'a> IntoIterator for &'a NoteIndex {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.ends_with(MARKDOWN_EXTENSION))
}

fn load_note(root: &Path, entry: &DirEntry) -> Result<Note> {
    let rel_path = relative_path(root, entry.path())?;
    let raw = std::fs::read_to_string(entry.path()).map_err(|e| VaultError::io(entry.path(), e))?;
    Note::parse(rel_path.clone(), &raw).map_err(|source| VaultError::Frontmatter {
        path: rel_path,
        source,
    })
}

/// Vault-relative path of `path`, joined with `/` on every platform.
fn relative_path(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| VaultError::OutsideVault(path.display().to_string()))?;
    let mut parts = Vec::new();
    for component in rel.components() {
        let part = component.as_os_str().to_str().ok_or_else(|| {
            VaultError::InvalidNoteName(component.as_os_str().to_string_lossy().into_owned())
        })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn paths(index: &NoteIndex) -> Vec<&str> {
        index.iter().map(|n| n.path.as_str()).collect()
    }

    // === Note::parse tests ===

    #[test]
    fn title_defaults_to_file_stem() {
        let note = Note::parse("folder/My Note.md", "body").unwrap();
        assert_eq!(note.title, "My Note");
        assert!(note.frontmatter.is_empty());
    }

    #[test]
    fn title_prefers_frontmatter_field() {
        let note = Note::parse("a.md", "---\ntitle: Proper Title\n---\nbody").unwrap();
        assert_eq!(note.title, "Proper Title");
    }

    #[test]
    fn empty_frontmatter_title_falls_back_to_stem() {
        let note = Note::parse("stem.md", "---\ntitle: \"\"\n---\nbody").unwrap();
        assert_eq!(note.title, "stem");
    }

    #[test]
    fn numeric_frontmatter_title_is_rendered() {
        let note = Note::parse("x.md", "---\ntitle: 2024\n---\n").unwrap();
        assert_eq!(note.title, "2024");
    }

    #[test]
    fn zero_frontmatter_title_falls_back_to_stem() {
        let note = Note::parse("Zero.md", "---\ntitle: 0\n---\n").unwrap();
        assert_eq!(note.title, "Zero");
        let note = Note::parse("Zero.md", "---\ntitle: 0.0\n---\n").unwrap();
        assert_eq!(note.title, "Zero");
        let note = Note::parse("Off.md", "---\ntitle: false\n---\n").unwrap();
        assert_eq!(note.title, "Off");
    }

    #[test]
    fn only_trailing_extension_is_stripped() {
        let note = Note::parse("notes.md.backup.md", "").unwrap();
        assert_eq!(note.title, "notes.md.backup");
    }

    #[test]
    fn links_and_tags_come_from_raw_text() {
        let raw = "---\ntopic: \"#meta\"\n---\nSee [[B|bee]] and [[C]] #todo #todo";
        let note = Note::parse("A.md", raw).unwrap();
        assert_eq!(note.links, vec!["B", "C"]);
        assert_eq!(note.tags, vec!["meta", "todo", "todo"]);
    }

    // === scan tests ===

    #[test]
    fn scans_nested_markdown_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "b.md", "b");
        write(root, "a.md", "a");
        write(root, "sub/c.md", "c");
        write(root, "sub/deeper/d.md", "d");
        write(root, "z.md", "z");

        let index = NoteIndex::scan(root).unwrap();
        assert_eq!(
            paths(&index),
            vec!["a.md", "b.md", "sub/c.md", "sub/deeper/d.md", "z.md"]
        );
    }

    #[test]
    fn skips_hidden_directories_but_not_hidden_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, ".obsidian/workspace.md", "hidden");
        write(root, ".trash/old.md", "hidden");
        write(root, ".dotfile.md", "visible");
        write(root, "visible.md", "visible");

        let index = NoteIndex::scan(root).unwrap();
        assert_eq!(paths(&index), vec![".dotfile.md", "visible.md"]);
    }

    #[test]
    fn ignores_non_markdown_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "image.png", "binary");
        write(root, "notes.txt", "text");
        write(root, "README.markdown", "not .md");
        write(root, "real.md", "note");

        let index = NoteIndex::scan(root).unwrap();
        assert_eq!(paths(&index), vec!["real.md"]);
    }

    #[test]
    fn malformed_frontmatter_skips_only_that_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "good1.md", "---\ntitle: One\n---\n");
        write(root, "broken.md", "---\nkey: [unclosed\n---\nbody");
        write(root, "good2.md", "plain");

        let index = NoteIndex::scan(root).unwrap();
        assert_eq!(paths(&index), vec!["good1.md", "good2.md"]);
    }

    #[test]
    fn non_mapping_leading_block_is_indexed_without_frontmatter() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "Essay.md",
            "---\nAn opening paragraph between rules.\n---\nSee [[Other]] #draft",
        );
        write(root, "List.md", "---\n- a\n- b\n---\nbody");

        let index = NoteIndex::scan(root).unwrap();
        assert_eq!(paths(&index), vec!["Essay.md", "List.md"]);

        let essay = index.get("Essay.md").unwrap();
        assert_eq!(essay.title, "Essay");
        assert!(essay.frontmatter.is_empty());
        assert_eq!(essay.links, vec!["Other"]);
        assert_eq!(essay.tags, vec!["draft"]);

        let list = index.get("List.md").unwrap();
        assert_eq!(list.title, "List");
        assert!(list.frontmatter.is_empty());
    }

    #[test]
    fn unreadable_file_skips_only_that_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "ok.md", "fine");
        fs::write(root.join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let index = NoteIndex::scan(root).unwrap();
        assert_eq!(paths(&index), vec!["ok.md"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = NoteIndex::scan(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, VaultError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn empty_vault_yields_empty_index() {
        let dir = TempDir::new().unwrap();
        let index = NoteIndex::scan(dir.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn get_finds_note_by_exact_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sub/x.md", "[[y]]");
        let index = NoteIndex::scan(dir.path()).unwrap();

        let note = index.get("sub/x.md").expect("note should be indexed");
        assert_eq!(note.links, vec!["y"]);
        assert!(index.get("x.md").is_none());
    }
}
