//! AsciiDoc navigation list serializer.

use crate::outline::OutlineEntry;

/// Default list marker.
pub const DEFAULT_MARKER: char = '*';

/// Serialize outlines as an AsciiDoc nested bullet list.
///
/// Each entry becomes one line: `depth + 1` markers, a space, and the
/// reference as stored. Parents come before their children.
pub struct NavSerializer {
    marker: char,
}

impl NavSerializer {
    /// Create a serializer using `marker` for list items.
    #[must_use]
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    /// Serialize entries, one line per entry, each terminated by `\n`.
    pub fn serialize(&self, entries: &[OutlineEntry]) -> String {
        let mut out = String::with_capacity(entries.len() * 32);
        for entry in entries {
            self.serialize_entry(entry, 0, &mut out);
        }
        out
    }

    fn serialize_entry(&self, entry: &OutlineEntry, depth: usize, out: &mut String) {
        out.extend(std::iter::repeat_n(self.marker, depth + 1));
        out.push(' ');
        out.push_str(&entry.reference);
        out.push('\n');

        for child in &entry.children {
            self.serialize_entry(child, depth + 1, out);
        }
    }
}

impl Default for NavSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}
