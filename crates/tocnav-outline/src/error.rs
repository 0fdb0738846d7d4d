//! Error types for outline generation.

use std::path::PathBuf;

/// Error while turning a table of contents into navigation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OutlineError {
    /// XML parsing error.
    #[error("XML parse error at byte {position}: {source}")]
    XmlParse {
        /// Byte offset where the reader stopped.
        position: u64,
        /// Underlying reader error.
        #[source]
        source: quick_xml::Error,
    },

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Document contains no element at all.
    #[error("document has no root element")]
    EmptyDocument,

    /// Input ended before an element was closed.
    #[error("unexpected end of document inside <{tag}>")]
    UnclosedElement {
        /// Tag of the innermost open element.
        tag: String,
    },

    /// Markup after the document element closed.
    #[error("unexpected content after the root element at byte {position}")]
    TrailingContent {
        /// Byte offset just past the offending markup.
        position: u64,
    },

    /// Entry carries no filename annotation and the fallback is disabled.
    #[error("entry {path} has no filename annotation")]
    MissingFilename {
        /// Position of the entry, e.g. `/toc/tocentry[2]`.
        path: String,
    },

    /// I/O error on the input or output file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl OutlineError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
