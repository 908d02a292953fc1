use tagex_locator::locate;
use tagex_reformat::{reformat, IndentUnit};

use crate::host::{EditorHost, HostError};
use crate::region::{resolve_normal, resolve_visual};

/// Result of one expand invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// The buffer was rewritten: `replaced` lines starting at `first_line`
    /// became `inserted` lines.
    Expanded {
        first_line: usize,
        replaced: usize,
        inserted: usize,
    },
    /// No complete tag pair in the search region; the buffer is untouched.
    NotFound,
}

/// Expand the tag pair at the cursor (normal mode) or inside the active
/// selection (visual mode) onto its own lines.
///
/// The whole replacement, including recursively expanded nested tags, is
/// computed in memory first, then applied as a single line-range edit, so
/// the buffer is either fully unchanged or fully transformed.
pub fn expand<H: EditorHost + ?Sized>(host: &mut H) -> Result<ExpandOutcome, HostError> {
    let region = match host.selection() {
        Some(selection) => resolve_visual(host, &selection)?,
        None => resolve_normal(host, host.cursor())?,
    };

    let Some(tag) = locate(&region.text, region.search.clone(), &region.strategy) else {
        return Ok(ExpandOutcome::NotFound);
    };

    let unit = IndentUnit::detect((0..host.line_count()).filter_map(|i| host.line(i)));
    let result = reformat(&region.text, &tag, &unit);

    let first_line = region.first_line + result.first_line;
    let last_line = region.first_line + result.last_line;
    let inserted = result.lines.len();
    host.replace_lines(first_line, last_line, result.lines)?;

    Ok(ExpandOutcome::Expanded {
        first_line,
        replaced: last_line - first_line + 1,
        inserted,
    })
}
