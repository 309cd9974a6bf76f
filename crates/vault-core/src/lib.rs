//! Core of the vault server: scanning a directory of markdown notes into an
//! in-memory index, and the queries and writes the tools run against it.

pub mod doc_resolver;
pub mod error;
pub mod frontmatter;
pub mod link_graph;
pub mod link_parser;
pub mod note_index;
pub mod search;
pub mod vault;

pub use error::{Result, VaultError};
pub use frontmatter::Frontmatter;
pub use note_index::{Note, NoteIndex};
pub use vault::{NoteFile, Vault};
