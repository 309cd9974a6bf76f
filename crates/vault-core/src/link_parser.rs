use regex::Regex;
use std::sync::LazyLock;

// Compile regex once, reuse across calls
static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]]+)\]\]").unwrap()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([A-Za-z0-9_/-]+)").unwrap()
});

/// Extract wikilink targets from raw note text.
///
/// Returns the part of each `[[...]]` before the first `|`, trimmed, in
/// order of occurrence. Duplicates are kept. Anchors are left in place and
/// code spans are not excluded: a link is whatever the pattern matches.
pub fn extract_wikilinks(markdown: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(markdown)
        .map(|cap| {
            let content = &cap[1];
            // Strip alias (|) - take only the part before |
            let target = content.split('|').next().unwrap_or(content);
            target.trim().to_string()
        })
        .collect()
}

/// Extract hash-tags from raw note text, without the leading `#`.
///
/// A tag is `#` followed by ASCII word characters, `-` or `/`, so nested
/// tags like `#project/alpha` come back whole. Duplicates are kept.
pub fn extract_tags(markdown: &str) -> Vec<String> {
    TAG_RE
        .captures_iter(markdown)
        .map(|cap| cap[1].to_string())
        .collect()
}
