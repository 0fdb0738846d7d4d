//! CLI command implementations.

mod args;
pub(crate) mod check;
pub(crate) mod convert;

pub(crate) use check::CheckArgs;
pub(crate) use convert::ConvertArgs;

use tocnav_outline::Summary;

use crate::output::Output;

/// Print outline counts, warning about placeholder entries.
fn report_summary(output: &Output, summary: &Summary, placeholder: &str) {
    output.info(&format!(
        "Entries: {} ({} top-level, depth {})",
        summary.entries, summary.top_level, summary.max_depth
    ));
    if summary.placeholders > 0 {
        output.warning(&format!(
            "{} entries have no filename and were labeled \"{placeholder}\"",
            summary.placeholders
        ));
    }
    if summary.dropped > 0 {
        output.warning(&format!(
            "{} entries nested below non-entry elements were dropped (set outline.nested_entries = \"hoist\" to keep them)",
            summary.dropped
        ));
    }
}
