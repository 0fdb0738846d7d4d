//! Outline builder.
//!
//! Turns a parsed [`TocNode`] tree into nested [`OutlineEntry`] values. The
//! walk is split in two: [`OutlineBuilder::is_entry`] decides whether a node
//! yields an entry, and the recursive descent visits every child regardless
//! of that answer.
//!
//! # Example
//!
//! ```
//! use tocnav_outline::{OutlineBuilder, OutlineOptions, TocParser};
//!
//! let xml = r#"<toc><tocentry><?dbhtml filename="intro.html"?></tocentry></toc>"#;
//! let root = TocParser::new().parse(xml).unwrap();
//! let entries = OutlineBuilder::new(OutlineOptions::default()).build(&root).unwrap();
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].reference, "xref:intro.adoc[]");
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::OutlineError;
use crate::reference::{self, AnnotationScope};
use crate::tree::TocNode;

/// What to do with an entry that has no filename annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFilenamePolicy {
    /// Use the placeholder label as the reference.
    #[default]
    Placeholder,
    /// Fail with [`OutlineError::MissingFilename`].
    Error,
}

/// What to do with entries found below a node that is not itself an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedEntryPolicy {
    /// Drop them and log how many were lost.
    #[default]
    Skip,
    /// Splice them into the enclosing list in place of the non-entry node.
    Hoist,
}

/// Options controlling how entries and references are derived.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Element name that marks an entry.
    pub entry_tag: String,
    /// Processing instruction target carrying the filename.
    pub pi_target: String,
    /// Where to search for the filename annotation.
    pub annotation_scope: AnnotationScope,
    /// Fallback when no filename is found.
    pub missing_filename: MissingFilenamePolicy,
    /// Label used by [`MissingFilenamePolicy::Placeholder`].
    pub placeholder: String,
    /// Handling of entries nested below non-entry nodes.
    pub nested_entries: NestedEntryPolicy,
    /// Extension of the published pages.
    pub source_extension: String,
    /// Extension of the Antora source pages.
    pub target_extension: String,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            entry_tag: "tocentry".to_owned(),
            pi_target: "dbhtml".to_owned(),
            annotation_scope: AnnotationScope::default(),
            missing_filename: MissingFilenamePolicy::default(),
            placeholder: "Appendix".to_owned(),
            nested_entries: NestedEntryPolicy::default(),
            source_extension: ".html".to_owned(),
            target_extension: ".adoc".to_owned(),
        }
    }
}

/// Navigation entry derived from a table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineEntry {
    /// Cross-reference directive or placeholder label.
    pub reference: String,
    /// Nested entries in document order.
    pub children: Vec<OutlineEntry>,
    /// Set when `reference` is the fallback label rather than an xref.
    pub placeholder: bool,
}

impl OutlineEntry {
    /// Create a leaf entry.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            children: Vec::new(),
            placeholder: false,
        }
    }

    /// Create a leaf entry carrying the fallback label.
    #[must_use]
    pub fn unresolved(label: impl Into<String>) -> Self {
        Self {
            placeholder: true,
            ..Self::new(label)
        }
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<OutlineEntry>) -> Self {
        self.children = children;
        self
    }

    /// Number of entries in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + count_entries(&self.children)
    }

    /// Depth of this subtree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + max_depth(&self.children)
    }
}

/// Total number of entries in a list of trees.
pub fn count_entries(entries: &[OutlineEntry]) -> usize {
    entries.iter().map(OutlineEntry::count).sum()
}

/// Number of entries that fell back to the placeholder label.
pub fn count_placeholders(entries: &[OutlineEntry]) -> usize {
    entries
        .iter()
        .map(|e| usize::from(e.placeholder) + count_placeholders(&e.children))
        .sum()
}

/// Deepest nesting level in a list of trees; zero for an empty list.
pub fn max_depth(entries: &[OutlineEntry]) -> usize {
    entries.iter().map(OutlineEntry::depth).max().unwrap_or(0)
}

/// Result of a build, including entries lost under [`NestedEntryPolicy::Skip`].
#[derive(Debug, Default)]
pub struct Outline {
    /// Top-level entries.
    pub entries: Vec<OutlineEntry>,
    /// Entries found below non-entry elements and discarded.
    pub dropped: usize,
}

/// Builds outlines from parsed table of contents trees.
pub struct OutlineBuilder {
    options: OutlineOptions,
}

impl OutlineBuilder {
    /// Create a builder with the given options.
    #[must_use]
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Whether `node` produces an outline entry.
    #[must_use]
    pub fn is_entry(&self, node: &TocNode) -> bool {
        node.tag == self.options.entry_tag
    }

    /// Build the outline for the direct children of `root`.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::MissingFilename`] for the first entry without
    /// an annotation when [`MissingFilenamePolicy::Error`] is selected. Entries
    /// below skipped non-entry nodes are checked as well.
    pub fn build(&self, root: &TocNode) -> Result<Vec<OutlineEntry>, OutlineError> {
        self.outline(root).map(|outline| outline.entries)
    }

    /// Like [`OutlineBuilder::build`], also counting dropped entries.
    ///
    /// # Errors
    ///
    /// Same as [`OutlineBuilder::build`].
    pub fn outline(&self, root: &TocNode) -> Result<Outline, OutlineError> {
        let path = format!("/{}", root.tag);
        let mut dropped = 0;
        let entries = self.collect(&root.children, &path, &mut dropped)?;
        Ok(Outline { entries, dropped })
    }

    /// Derive the reference for an entry node.
    ///
    /// `path` only appears in the error for a missing annotation.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::MissingFilename`] if no annotation is found and
    /// the placeholder fallback is disabled.
    pub fn derive_reference(&self, node: &TocNode, path: &str) -> Result<String, OutlineError> {
        match self.resolve(node) {
            Some(xref) => Ok(xref),
            None => self.fallback(path),
        }
    }

    /// Cross-reference from the node's filename annotation, if it has one.
    fn resolve(&self, node: &TocNode) -> Option<String> {
        let opts = &self.options;
        let filename = reference::find_filename(node, &opts.pi_target, opts.annotation_scope)?;
        let page =
            reference::replace_extension(filename, &opts.source_extension, &opts.target_extension);
        Some(reference::xref(&page))
    }

    fn fallback(&self, path: &str) -> Result<String, OutlineError> {
        let opts = &self.options;
        match opts.missing_filename {
            MissingFilenamePolicy::Placeholder => {
                tracing::warn!(%path, placeholder = %opts.placeholder, "Entry has no filename, using placeholder");
                Ok(opts.placeholder.clone())
            }
            MissingFilenamePolicy::Error => Err(OutlineError::MissingFilename {
                path: path.to_owned(),
            }),
        }
    }

    /// Filter-and-transform a sibling list, descending into every node.
    fn collect(
        &self,
        nodes: &[TocNode],
        parent_path: &str,
        dropped: &mut usize,
    ) -> Result<Vec<OutlineEntry>, OutlineError> {
        let mut entries = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for node in nodes {
            let position = positions.entry(node.tag.as_str()).or_insert(0);
            *position += 1;
            let path = format!("{parent_path}/{}[{position}]", node.tag);

            if self.is_entry(node) {
                let (reference, placeholder) = match self.resolve(node) {
                    Some(xref) => (xref, false),
                    None => (self.fallback(&path)?, true),
                };
                tracing::debug!(%path, %reference, "Entry");
                let children = self.collect(&node.children, &path, dropped)?;
                entries.push(OutlineEntry {
                    reference,
                    children,
                    placeholder,
                });
                continue;
            }

            let nested = self.collect(&node.children, &path, dropped)?;
            if nested.is_empty() {
                continue;
            }
            match self.options.nested_entries {
                NestedEntryPolicy::Skip => {
                    let count = count_entries(&nested);
                    *dropped += count;
                    tracing::warn!(
                        %path,
                        count,
                        "Dropped entries nested below a non-entry element"
                    );
                }
                NestedEntryPolicy::Hoist => {
                    tracing::debug!(%path, count = nested.len(), "Hoisting nested entries");
                    entries.extend(nested);
                }
            }
        }

        Ok(entries)
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new(OutlineOptions::default())
    }
}
