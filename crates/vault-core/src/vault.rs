use crate::error::{Result, VaultError};
use crate::frontmatter::{self, Frontmatter};
use crate::note_index::{NoteIndex, MARKDOWN_EXTENSION};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A note read back from disk, split into frontmatter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFile {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// A vault rooted at a directory of markdown files.
///
/// Holds no state besides the root: every [`Vault::index`] call rescans the
/// tree, and writes go straight to disk.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the vault is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the whole vault into a fresh index.
    pub fn index(&self) -> Result<NoteIndex> {
        NoteIndex::scan(&self.root)
    }

    /// Absolute location of a vault-relative path.
    pub fn resolve_path(&self, rel_path: &str) -> Result<PathBuf> {
        let normalized = normalize_relative(rel_path)?;
        Ok(self.root.join(normalized))
    }

    /// Read and parse a single note.
    pub fn read_note(&self, rel_path: &str) -> Result<NoteFile> {
        let abs = self.resolve_path(rel_path)?;
        let content = fs::read_to_string(&abs).map_err(|e| VaultError::io(&abs, e))?;
        let (frontmatter, body) =
            frontmatter::parse(&content).map_err(|source| VaultError::Frontmatter {
                path: rel_path.to_string(),
                source,
            })?;
        Ok(NoteFile {
            frontmatter,
            body: body.to_string(),
        })
    }

    /// Write a note, creating missing parent directories.
    ///
    /// With non-empty `frontmatter` the file gets a YAML block before
    /// `content`; otherwise `content` is written verbatim. An existing file
    /// is overwritten.
    pub fn write_note(
        &self,
        rel_path: &str,
        content: &str,
        frontmatter: Option<&Frontmatter>,
    ) -> Result<()> {
        let abs = self.resolve_path(rel_path)?;
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).map_err(|e| VaultError::io(parent, e))?;
        }

        let rendered = match frontmatter {
            Some(fm) => frontmatter::render(fm, content).map_err(|source| {
                VaultError::Frontmatter {
                    path: rel_path.to_string(),
                    source,
                }
            })?,
            None => content.to_string(),
        };

        fs::write(&abs, rendered).map_err(|e| VaultError::io(&abs, e))?;
        tracing::debug!("Wrote note {}", rel_path);
        Ok(())
    }

    /// Create a note named after `title` under `folder` (default: vault root).
    ///
    /// Returns the vault-relative path written. A note with the same file
    /// name is overwritten.
    pub fn create_note(
        &self,
        title: &str,
        content: &str,
        folder: Option<&str>,
        frontmatter: Option<&Frontmatter>,
    ) -> Result<String> {
        let stem = sanitize_file_stem(title);
        if stem.is_empty() {
            return Err(VaultError::InvalidNoteName(title.to_string()));
        }
        let file_name = format!("{stem}{MARKDOWN_EXTENSION}");

        let folder = normalize_relative(folder.unwrap_or(""))?;
        let rel_path = if folder.is_empty() {
            file_name
        } else {
            format!("{folder}/{file_name}")
        };

        self.write_note(&rel_path, content, frontmatter)?;
        tracing::info!("Created note {}", rel_path);
        Ok(rel_path)
    }

    /// Merge `fields` into a note's frontmatter (or replace it when `merge`
    /// is false) and rewrite the note with its body unchanged.
    ///
    /// Returns the frontmatter that was written.
    pub fn update_frontmatter(
        &self,
        rel_path: &str,
        fields: Frontmatter,
        merge: bool,
    ) -> Result<Frontmatter> {
        let NoteFile {
            frontmatter: existing,
            body,
        } = self.read_note(rel_path)?;

        let updated = if merge {
            let mut merged = existing;
            for (key, value) in fields {
                merged.insert(key, value);
            }
            merged
        } else {
            fields
        };

        self.write_note(rel_path, &body, Some(&updated))?;
        Ok(updated)
    }
}

/// Keep only ASCII letters, digits, `-`, `_` and spaces.
pub fn sanitize_file_stem(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect()
}

/// Normalize a vault-relative path to `/`-joined segments.
///
/// `.` segments are dropped and `..` pops a segment. Absolute paths and paths
/// that climb above the root are rejected.
fn normalize_relative(rel_path: &str) -> Result<String> {
    let mut parts: Vec<&str> = Vec::new();
    for component in Path::new(rel_path).components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| VaultError::InvalidNoteName(rel_path.to_string()))?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(VaultError::OutsideVault(rel_path.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(VaultError::OutsideVault(rel_path.to_string()));
            }
        }
    }
    Ok(parts.join("/"))
}
