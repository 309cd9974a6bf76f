use crate::note_index::{Note, NoteIndex};
use serde::Serialize;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Filters for [`search`]. All given filters must match.
#[derive(Debug, Clone)]
pub struct SearchQuery<'a> {
    /// Case-insensitive substring of the title or path. Empty matches all.
    pub query: &'a str,
    /// Tag that must appear verbatim in the note's tags.
    pub tag: Option<&'a str>,
    /// Plain string prefix of the note path (not segment-aware).
    pub folder: Option<&'a str>,
    pub limit: usize,
}

impl<'a> SearchQuery<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            tag: None,
            folder: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    fn matches(&self, note: &Note, needle: &str) -> bool {
        let matches_query =
            note.title.to_lowercase().contains(needle) || note.path.to_lowercase().contains(needle);
        let matches_tag = self
            .tag
            .map_or(true, |tag| note.tags.iter().any(|t| t == tag));
        let matches_folder = self
            .folder
            .map_or(true, |folder| note.path.starts_with(folder));

        matches_query && matches_tag && matches_folder
    }
}

/// A search result: the note without its frontmatter or full link list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub path: String,
    pub title: String,
    pub tags: Vec<String>,
    pub link_count: usize,
}

impl From<&Note> for SearchHit {
    fn from(note: &Note) -> Self {
        Self {
            path: note.path.clone(),
            title: note.title.clone(),
            tags: note.tags.clone(),
            link_count: note.links.len(),
        }
    }
}

/// Filter the index in scan order. No scoring: the first `limit` matches
/// (limit clamped to 1..=100) are returned as found.
pub fn search(index: &NoteIndex, query: &SearchQuery<'_>) -> Vec<SearchHit> {
    let needle = query.query.to_lowercase();
    let limit = query.limit.clamp(1, MAX_SEARCH_LIMIT);

    index
        .iter()
        .filter(|note| query.matches(note, &needle))
        .take(limit)
        .map(SearchHit::from)
        .collect()
}
