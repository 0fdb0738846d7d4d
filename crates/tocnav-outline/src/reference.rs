//! Cross-reference derivation from `dbhtml` filename annotations.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::tree::TocNode;

/// Pattern for the `filename` pseudo-attribute of a processing instruction.
static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bfilename\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("invalid filename regex")
});

/// Where to look for the filename annotation of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationScope {
    /// Only instructions that are direct children of the entry.
    #[default]
    Children,
    /// The entry's own instructions, then its descendants' in document order.
    Subtree,
}

/// Extract the `filename` value from processing instruction content.
///
/// Accepts single or double quotes. An empty value counts as absent.
pub fn filename_from_instruction(content: &str) -> Option<&str> {
    let caps = FILENAME_PATTERN.captures(content)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .filter(|value| !value.is_empty())
}

/// Find the filename annotation of `node`.
pub fn find_filename<'a>(node: &'a TocNode, target: &str, scope: AnnotationScope) -> Option<&'a str> {
    let own = node
        .instructions
        .iter()
        .filter(|pi| pi.target == target)
        .find_map(|pi| filename_from_instruction(&pi.content));

    match scope {
        AnnotationScope::Children => own,
        AnnotationScope::Subtree => own.or_else(|| {
            node.children
                .iter()
                .find_map(|child| find_filename(child, target, scope))
        }),
    }
}

/// Swap a trailing `from` extension for `to`; other paths are returned unchanged.
pub fn replace_extension(path: &str, from: &str, to: &str) -> String {
    match path.strip_suffix(from) {
        Some(stem) => format!("{stem}{to}"),
        None => path.to_owned(),
    }
}

/// Wrap a page path as an Antora cross-reference: `xref:<path>[]`.
pub fn xref(path: &str) -> String {
    format!("xref:{path}[]")
}
