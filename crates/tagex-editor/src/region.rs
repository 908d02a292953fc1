use std::ops::Range;

use tagex_locator::Strategy;

use crate::host::{EditorHost, HostError, Position, Selection};

/// The operative slice of the buffer for one expansion.
///
/// `text` is the region's lines joined with `\n`; `search` is the char range
/// of `text` in which opening tags may start. Both mode resolvers produce
/// this same shape, consumed identically downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Buffer line index of the region's first line.
    pub first_line: usize,
    /// Buffer line index of the region's last line, inclusive.
    pub last_line: usize,
    pub text: String,
    pub search: Range<usize>,
    pub strategy: Strategy,
}

/// Normal mode: opening tags are searched on the cursor line only, but the
/// region runs to the end of the buffer so a pair that closes on a later
/// line (an already-expanded block, say) still matches.
pub fn resolve_normal<H: EditorHost + ?Sized>(
    host: &H,
    cursor: Position,
) -> Result<Region, HostError> {
    let len = host.line_count();
    if cursor.line >= len {
        return Err(HostError::LineOutOfBounds {
            line: cursor.line,
            len,
        });
    }

    let lines = host.lines(cursor.line, len - 1)?;
    let cursor_line_len = lines[0].chars().count();
    let offset = cursor.column.min(cursor_line_len);

    Ok(Region {
        first_line: cursor.line,
        last_line: len - 1,
        text: lines.join("\n"),
        search: 0..cursor_line_len,
        strategy: Strategy::Cursor(offset),
    })
}

/// Visual mode: the region is exactly the selected lines; a linewise
/// selection searches the whole region text, a charwise one only the
/// selected char span.
pub fn resolve_visual<H: EditorHost + ?Sized>(
    host: &H,
    selection: &Selection,
) -> Result<Region, HostError> {
    match *selection {
        Selection::Linewise { first, last } => {
            let lines = host.lines(first, last)?;
            let text = lines.join("\n");
            let len = text.chars().count();
            Ok(Region {
                first_line: first,
                last_line: last,
                text,
                search: 0..len,
                strategy: Strategy::Selection,
            })
        }
        Selection::Charwise { start, end } => {
            // Hosts report anchors in either order.
            let (start, end) = if start <= end { (start, end) } else { (end, start) };
            let lines = host.lines(start.line, end.line)?;

            // Char offset of each region line's start in the joined text.
            let mut line_start = 0;
            let mut starts = Vec::with_capacity(lines.len());
            for line in &lines {
                starts.push(line_start);
                line_start += line.chars().count() + 1;
            }

            let text = lines.join("\n");
            let len = text.chars().count();
            let first_len = lines[0].chars().count();
            let last_len = lines[lines.len() - 1].chars().count();

            let from = start.column.min(first_len);
            let to = starts[lines.len() - 1] + end.column.min(last_len);

            Ok(Region {
                first_line: start.line,
                last_line: end.line,
                text,
                // The selection end is inclusive.
                search: from..(to + 1).min(len),
                strategy: Strategy::Selection,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScratchBuffer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normal_region_runs_to_buffer_end() {
        let buf = ScratchBuffer::new("a\nb\nc");
        let region = resolve_normal(&buf, Position::new(1, 0)).unwrap();
        assert_eq!((region.first_line, region.last_line), (1, 2));
        assert_eq!(region.text, "b\nc");
        assert_eq!(region.search, 0..1);
        assert_eq!(region.strategy, Strategy::Cursor(0));
    }

    #[test]
    fn test_normal_cursor_column_clamped_to_line() {
        let buf = ScratchBuffer::new("ab");
        let region = resolve_normal(&buf, Position::new(0, 99)).unwrap();
        assert_eq!(region.strategy, Strategy::Cursor(2));
    }

    #[test]
    fn test_normal_cursor_line_out_of_bounds() {
        let buf = ScratchBuffer::new("a");
        assert_eq!(
            resolve_normal(&buf, Position::new(5, 0)),
            Err(HostError::LineOutOfBounds { line: 5, len: 1 })
        );
    }

    #[test]
    fn test_linewise_region_is_the_selected_lines() {
        let buf = ScratchBuffer::new("a\nbb\nccc\nd");
        let sel = Selection::Linewise { first: 1, last: 2 };
        let region = resolve_visual(&buf, &sel).unwrap();
        assert_eq!(region.text, "bb\nccc");
        assert_eq!(region.search, 0..6);
        assert_eq!(region.strategy, Strategy::Selection);
    }

    #[test]
    fn test_charwise_region_searches_the_selected_span() {
        let buf = ScratchBuffer::new("xx<a>y</a>zz");
        let sel = Selection::Charwise {
            start: Position::new(0, 2),
            end: Position::new(0, 9),
        };
        let region = resolve_visual(&buf, &sel).unwrap();
        // Inclusive end: the span covers the closing `>`.
        assert_eq!(region.search, 2..10);
    }

    #[test]
    fn test_charwise_region_across_lines() {
        let buf = ScratchBuffer::new("aa\nbbbb\ncc");
        let sel = Selection::Charwise {
            start: Position::new(0, 1),
            end: Position::new(2, 0),
        };
        let region = resolve_visual(&buf, &sel).unwrap();
        assert_eq!(region.text, "aa\nbbbb\ncc");
        // Line 2 starts at offset 8 in the joined text.
        assert_eq!(region.search, 1..9);
    }

    #[test]
    fn test_charwise_anchors_in_reverse_order() {
        let buf = ScratchBuffer::new("xx<a>y</a>zz");
        let sel = Selection::Charwise {
            start: Position::new(0, 9),
            end: Position::new(0, 2),
        };
        let region = resolve_visual(&buf, &sel).unwrap();
        assert_eq!(region.search, 2..10);
    }
}
