//! YAML frontmatter: the `---` delimited block at the top of a note.
//!
//! Values are carried as an insertion-ordered JSON map so they can flow
//! straight into tool responses and back out to YAML without a second model.

use serde_json::{Map, Value};
use thiserror::Error;

/// Parsed frontmatter fields, in the order they appear in the file.
pub type Frontmatter = Map<String, Value>;

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("frontmatter is not a key-value mapping")]
    NotAMapping,
}

/// Split content into the raw YAML block (if any) and the body after it.
///
/// The opening delimiter must be the very first line. The body starts right
/// after the newline that ends the closing delimiter.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    // Empty block: closing delimiter immediately follows the opening one.
    if let Some(body) = rest
        .strip_prefix("---\n")
        .or_else(|| rest.strip_prefix("---\r\n"))
    {
        return (Some(""), body);
    }
    if rest == "---" {
        return (Some(""), "");
    }

    let lf = rest.find("\n---\n").map(|i| (i, i + 5));
    let crlf = rest.find("\n---\r\n").map(|i| (i, i + 6));
    let closing = match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
    .or_else(|| rest.strip_suffix("\n---").map(|yaml| (yaml.len(), rest.len())));

    match closing {
        Some((yaml_end, body_start)) => (Some(&rest[..yaml_end]), &rest[body_start..]),
        None => (None, content),
    }
}

/// Parse content into its frontmatter fields and body.
///
/// Content without a frontmatter block yields an empty map and the whole
/// content as body.
pub fn parse(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let (yaml, body) = split(content);
    let frontmatter = match yaml {
        Some(yaml) => parse_yaml(yaml)?,
        None => Frontmatter::new(),
    };
    Ok((frontmatter, body))
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    let blank = yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Frontmatter::new());
    }
    match serde_yaml::from_str::<serde_yaml::Value>(yaml)? {
        serde_yaml::Value::Null => Ok(Frontmatter::new()),
        serde_yaml::Value::Mapping(mapping) => Ok(mapping_to_map(mapping)),
        serde_yaml::Value::Tagged(tagged) => match tagged.value {
            serde_yaml::Value::Mapping(mapping) => Ok(mapping_to_map(mapping)),
            _ => Err(FrontmatterError::NotAMapping),
        },
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Render frontmatter and body back into note content.
///
/// An empty map renders the body verbatim, without delimiters.
pub fn render(frontmatter: &Frontmatter, body: &str) -> Result<String, FrontmatterError> {
    if frontmatter.is_empty() {
        return Ok(body.to_string());
    }
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("---\n{}\n---\n{}", yaml.trim_end_matches('\n'), body))
}

fn mapping_to_map(mapping: serde_yaml::Mapping) -> Frontmatter {
    mapping
        .into_iter()
        .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
        .collect()
}

fn key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // .inf and .nan have no JSON number form
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(n.to_string()))
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(mapping) => Value::Object(mapping_to_map(mapping)),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
