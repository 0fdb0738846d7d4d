//! Parse, outline, serialize and write in one pass.

use std::fs;
use std::path::Path;

use crate::error::OutlineError;
use crate::outline::{self, OutlineBuilder, OutlineEntry, OutlineOptions};
use crate::parser::TocParser;
use crate::serializer::NavSerializer;
use crate::writer::write_navigation;

/// Rendered navigation together with the outline it came from.
#[derive(Debug)]
pub struct Navigation {
    /// Outline entries.
    pub entries: Vec<OutlineEntry>,
    /// Serialized AsciiDoc list.
    pub text: String,
    /// Entries discarded below non-entry elements.
    pub dropped: usize,
}

/// Counts reported after a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Total number of entries at all levels.
    pub entries: usize,
    /// Number of top-level entries.
    pub top_level: usize,
    /// Deepest nesting level.
    pub max_depth: usize,
    /// Entries that fell back to the placeholder label.
    pub placeholders: usize,
    /// Entries discarded below non-entry elements.
    pub dropped: usize,
}

impl Navigation {
    /// Summarize the outline.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            entries: outline::count_entries(&self.entries),
            top_level: self.entries.len(),
            max_depth: outline::max_depth(&self.entries),
            placeholders: outline::count_placeholders(&self.entries),
            dropped: self.dropped,
        }
    }
}

/// Table of contents to navigation pipeline.
pub struct Transformer {
    parser: TocParser,
    builder: OutlineBuilder,
    serializer: NavSerializer,
}

impl Transformer {
    /// Create a transformer from outline options and a list marker.
    #[must_use]
    pub fn new(options: OutlineOptions, marker: char) -> Self {
        Self {
            parser: TocParser::new(),
            builder: OutlineBuilder::new(options),
            serializer: NavSerializer::new(marker),
        }
    }

    /// Transform an XML string into navigation.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or an annotation is missing in strict mode.
    pub fn transform(&self, xml: &str) -> Result<Navigation, OutlineError> {
        let root = self.parser.parse(xml)?;
        let outline = self.builder.outline(&root)?;
        let text = self.serializer.serialize(&outline.entries);
        Ok(Navigation {
            entries: outline.entries,
            text,
            dropped: outline.dropped,
        })
    }

    /// Read and transform a table of contents file.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::Io`] if the file cannot be read, or any error
    /// from [`Transformer::transform`].
    pub fn transform_file(&self, input: &Path) -> Result<Navigation, OutlineError> {
        let xml = fs::read_to_string(input).map_err(OutlineError::io(input))?;
        tracing::debug!(path = %input.display(), bytes = xml.len(), "Read table of contents");
        self.transform(&xml)
    }

    /// Convert `input` and write the navigation file to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, transforming or writing fails. Nothing is
    /// written when reading or transforming fails.
    pub fn run(&self, input: &Path, output: &Path) -> Result<Summary, OutlineError> {
        let navigation = self.transform_file(input)?;
        write_navigation(output, &navigation.text)?;
        Ok(navigation.summary())
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(OutlineOptions::default(), crate::serializer::DEFAULT_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_PAGES: &str = r#"<toc><tocentry><?dbhtml filename="intro.html"?></tocentry><tocentry><?dbhtml filename="setup.html"?></tocentry></toc>"#;

    #[test]
    fn test_transform_two_pages() {
        let navigation = Transformer::default().transform(TWO_PAGES).unwrap();
        assert_eq!(navigation.text, "* xref:intro.adoc[]\n* xref:setup.adoc[]\n");
    }

    #[test]
    fn test_transform_nested_entry() {
        let xml = r#"<toc>
  <tocentry><?dbhtml filename="guide.html"?>
    <tocentry><?dbhtml filename="guide/install.html"?></tocentry>
  </tocentry>
</toc>"#;
        let navigation = Transformer::default().transform(xml).unwrap();
        assert_eq!(
            navigation.text,
            "* xref:guide.adoc[]\n** xref:guide/install.adoc[]\n"
        );
    }

    #[test]
    fn test_transform_is_stable() {
        let transformer = Transformer::default();
        let first = transformer.transform(TWO_PAGES).unwrap();
        let second = transformer.transform(TWO_PAGES).unwrap();
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn test_summary() {
        let xml = r#"<toc>
  <tocentry><?dbhtml filename="a.html"?>
    <tocentry/>
  </tocentry>
  <tocentry><?dbhtml filename="b.html"?></tocentry>
</toc>"#;
        let navigation = Transformer::default().transform(xml).unwrap();

        assert_eq!(
            navigation.summary(),
            Summary {
                entries: 3,
                top_level: 2,
                max_depth: 2,
                placeholders: 1,
                dropped: 0,
            }
        );
    }

    #[test]
    fn test_summary_reports_dropped_entries() {
        let xml = r#"<toc>
  <tocentry><?dbhtml filename="a.html"?></tocentry>
  <tocdiv>
    <title>Reference</title>
    <tocentry><?dbhtml filename="ref/b.html"?></tocentry>
    <tocentry><?dbhtml filename="ref/c.html"?></tocentry>
  </tocdiv>
</toc>"#;
        let navigation = Transformer::default().transform(xml).unwrap();

        assert_eq!(navigation.text, "* xref:a.adoc[]\n");
        let summary = navigation.summary();
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.dropped, 2);
    }

    #[test]
    fn test_transform_rejects_content_after_root() {
        let xml = r#"<toc><tocentry><?dbhtml filename="a.html"?></tocentry></toc><tocentry/>"#;
        let err = Transformer::default().transform(xml).unwrap_err();
        assert!(matches!(err, OutlineError::TrailingContent { .. }), "unexpected error: {err:?}");
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("toc.xml");
        let output = dir.path().join("nav.adoc");
        fs::write(&input, TWO_PAGES).unwrap();
        fs::write(&output, "stale\n").unwrap();

        let summary = Transformer::default().run(&input, &output).unwrap();

        assert_eq!(summary.entries, 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "* xref:intro.adoc[]\n* xref:setup.adoc[]\n"
        );
    }

    #[test]
    fn test_run_missing_input_leaves_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nav.adoc");
        fs::write(&output, "kept\n").unwrap();

        let err = Transformer::default()
            .run(&dir.path().join("missing.xml"), &output)
            .unwrap_err();

        assert!(matches!(err, OutlineError::Io { .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "kept\n");
    }
}
