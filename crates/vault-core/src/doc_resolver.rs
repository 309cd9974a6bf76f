use crate::note_index::{Note, MARKDOWN_EXTENSION};

/// Title a note is addressed by when only its path is known: the last path
/// segment without the trailing `.md`.
pub fn title_for_path(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(name)
}

/// Resolve a wikilink target to the first note (in index order) whose title
/// equals it, whose path equals it, or whose path equals it plus `.md`.
///
/// No basename matching, no case folding, no relative resolution.
pub fn resolve_link<'a, I>(notes: I, link: &str) -> Option<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    notes.into_iter().find(|note| {
        note.title == link
            || note.path == link
            || note.path.strip_suffix(MARKDOWN_EXTENSION) == Some(link)
    })
}

/// The link spellings that count as a reference to one note path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget<'a> {
    pub title: &'a str,
    pub path: &'a str,
    pub path_without_extension: &'a str,
}

impl<'a> LinkTarget<'a> {
    /// Targets for a note path as the caller wrote it. The note need not exist.
    pub fn for_path(path: &'a str) -> Self {
        Self {
            title: title_for_path(path),
            path,
            path_without_extension: path.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(path),
        }
    }

    pub fn matches(&self, link: &str) -> bool {
        link == self.title || link == self.path || link == self.path_without_extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(path: &str, title: &str) -> Note {
        Note {
            path: path.to_string(),
            title: title.to_string(),
            frontmatter: Default::default(),
            links: Vec::new(),
            tags: Vec::new(),
        }
    }

    // === title_for_path tests ===

    #[test]
    fn title_for_root_level_path() {
        assert_eq!(title_for_path("Photosynthesis.md"), "Photosynthesis");
    }

    #[test]
    fn title_for_nested_path() {
        assert_eq!(title_for_path("Notes/Ideas.md"), "Ideas");
    }

    #[test]
    fn title_without_extension_is_unchanged() {
        assert_eq!(title_for_path("Notes/Ideas"), "Ideas");
    }

    // === resolve_link tests ===

    #[test]
    fn resolves_by_title() {
        let notes = vec![note("a/x.md", "Custom Title")];
        let found = resolve_link(&notes, "Custom Title").unwrap();
        assert_eq!(found.path, "a/x.md");
    }

    #[test]
    fn resolves_by_exact_path() {
        let notes = vec![note("a/x.md", "x")];
        assert!(resolve_link(&notes, "a/x.md").is_some());
    }

    #[test]
    fn resolves_by_path_without_extension() {
        let notes = vec![note("a/x.md", "x")];
        assert!(resolve_link(&notes, "a/x").is_some());
    }

    #[test]
    fn first_match_in_index_order_wins() {
        let notes = vec![note("one/Dup.md", "Dup"), note("two/Dup.md", "Dup")];
        let found = resolve_link(&notes, "Dup").unwrap();
        assert_eq!(found.path, "one/Dup.md");
    }

    #[test]
    fn title_match_is_case_sensitive() {
        let notes = vec![note("Foo.md", "Foo")];
        assert!(resolve_link(&notes, "foo").is_none());
    }

    #[test]
    fn bare_basename_does_not_match_nested_path_without_title() {
        let notes = vec![note("deep/Target.md", "Other Title")];
        assert!(resolve_link(&notes, "Target").is_none());
    }

    // === LinkTarget tests ===

    #[test]
    fn link_target_matches_all_spellings() {
        let target = LinkTarget::for_path("folder/B.md");
        assert!(target.matches("B"));
        assert!(target.matches("folder/B.md"));
        assert!(target.matches("folder/B"));
        assert!(!target.matches("B.md"));
        assert!(!target.matches("b"));
    }

    #[test]
    fn link_target_for_root_note_accepts_file_name() {
        let target = LinkTarget::for_path("B.md");
        assert!(target.matches("B"));
        assert!(target.matches("B.md"));
    }
}
