//! Free-text workflow description embedded in leading YAML comments.
//!
//! ```yaml
//! # <!-- description -->
//! # Builds and publishes the package.
//! #
//! # Runs on every release tag.
//! name: Release
//! ```
//!
//! The YAML parser drops comments, so this runs on the raw text.

/// Comment line that opens the description block.
pub const DESCRIPTION_MARKER: &str = "# <!-- description -->";

/// Extract the description block following [`DESCRIPTION_MARKER`].
///
/// Every contiguous `#` line after the marker contributes one line with its
/// `#` run and surrounding whitespace removed. The block ends at the first
/// line that is not a comment, including a blank line. Returns an empty
/// string when the marker never appears.
pub fn extract_description(text: &str) -> String {
    let mut lines = text.lines();
    if !lines
        .by_ref()
        .any(|line| line.trim_end() == DESCRIPTION_MARKER)
    {
        return String::new();
    }

    let collected: Vec<&str> = lines
        .take_while(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim())
        .collect();

    collected.join("\n").trim_end_matches('\n').to_string()
}
