//! DocBook table of contents to Antora navigation.
//!
//! Reads a `<toc>` document whose `<tocentry>` elements carry
//! `<?dbhtml filename="..."?>` annotations and produces an AsciiDoc nested
//! list of `xref:` directives suitable for an Antora `nav.adoc`.
//!
//! The pipeline is parse ([`TocParser`]), outline ([`OutlineBuilder`]),
//! serialize ([`NavSerializer`]) and write ([`write_navigation`]).
//! [`Transformer`] runs all four.
//!
//! # Example
//!
//! ```
//! use tocnav_outline::Transformer;
//!
//! let xml = r#"<toc><tocentry><?dbhtml filename="intro.html"?></tocentry></toc>"#;
//! let navigation = Transformer::default().transform(xml).unwrap();
//! assert_eq!(navigation.text, "* xref:intro.adoc[]\n");
//! ```

mod error;
mod outline;
mod parser;
pub mod reference;
mod serializer;
mod transformer;
mod tree;
mod writer;

pub use error::OutlineError;
pub use outline::{
    MissingFilenamePolicy, NestedEntryPolicy, Outline, OutlineBuilder, OutlineEntry,
    OutlineOptions, count_entries, count_placeholders, max_depth,
};
pub use parser::TocParser;
pub use reference::AnnotationScope;
pub use serializer::{DEFAULT_MARKER, NavSerializer};
pub use transformer::{Navigation, Summary, Transformer};
pub use tree::{Instruction, TocNode};
pub use writer::write_navigation;
