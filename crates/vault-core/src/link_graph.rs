//! Backlink lookup and connection graphs over the wikilinks of a [`NoteIndex`].

use crate::doc_resolver::{resolve_link, LinkTarget};
use crate::note_index::{Note, NoteIndex};
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_GRAPH_DEPTH: usize = 2;
pub const MAX_GRAPH_DEPTH: usize = 5;
/// Number of notes used as traversal seeds when no root note is given.
pub const GRAPH_SEED_LIMIT: usize = 50;

/// A note that links to the target of a backlink query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backlink {
    pub path: String,
    pub title: String,
}

/// All notes with a link to `note_path`, in index order.
///
/// A link counts when it equals the target's title (file stem), its path as
/// given, or that path without `.md`. The target does not have to exist.
pub fn backlinks(index: &NoteIndex, note_path: &str) -> Vec<Backlink> {
    let target = LinkTarget::for_path(note_path);
    index
        .iter()
        .filter(|note| note.links.iter().any(|link| target.matches(link)))
        .map(|note| Backlink {
            path: note.path.clone(),
            title: note.title.clone(),
        })
        .collect()
}

/// One visited note in a connection graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    /// The note's raw links, resolved or not.
    pub links: Vec<String>,
}

impl From<&Note> for GraphNode {
    fn from(note: &Note) -> Self {
        Self {
            id: note.path.clone(),
            title: note.title.clone(),
            links: note.links.clone(),
        }
    }
}

/// Depth-first walk over resolved wikilinks.
///
/// `visited` spans the whole build, so a note reachable from several seeds
/// or along a cycle is emitted once, at its first visit.
struct GraphBuilder<'a> {
    index: &'a NoteIndex,
    max_depth: usize,
    visited: HashSet<String>,
    nodes: Vec<GraphNode>,
}

impl<'a> GraphBuilder<'a> {
    fn new(index: &'a NoteIndex, max_depth: usize) -> Self {
        Self {
            index,
            max_depth,
            visited: HashSet::new(),
            nodes: Vec::new(),
        }
    }

    fn visit(&mut self, path: &str, depth: usize) {
        if depth > self.max_depth || self.visited.contains(path) {
            return;
        }
        self.visited.insert(path.to_string());

        let index = self.index;
        let Some(note) = index.get(path) else {
            return;
        };
        self.nodes.push(GraphNode::from(note));

        for link in &note.links {
            if let Some(linked) = resolve_link(index, link) {
                self.visit(&linked.path, depth + 1);
            }
        }
    }
}

/// Build the connection graph.
///
/// With `root`, traversal starts at that path. Without it, the first
/// [`GRAPH_SEED_LIMIT`] notes in index order each seed a traversal. `depth`
/// is clamped to `1..=MAX_GRAPH_DEPTH`; the start note is depth 1.
pub fn build_graph(index: &NoteIndex, root: Option<&str>, depth: usize) -> Vec<GraphNode> {
    let mut builder = GraphBuilder::new(index, depth.clamp(1, MAX_GRAPH_DEPTH));

    match root {
        Some(root) => builder.visit(root, 1),
        None => {
            for note in index.iter().take(GRAPH_SEED_LIMIT) {
                builder.visit(&note.path, 1);
            }
        }
    }

    builder.nodes
}
