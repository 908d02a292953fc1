/// A position in a buffer: zero-based line and column, columns in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// An active selection, in the host's own terms.
///
/// Ends are inclusive, editor-style. A "tag object" pre-selection is simply
/// a charwise selection exactly bracketing a tag's outer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Whole lines, `first..=last`.
    Linewise { first: usize, last: usize },
    /// An arbitrary char range, `start..=end`.
    Charwise { start: Position, end: Position },
}

/// Structural misuse of the host boundary. Absent or malformed markup is
/// never an error; that degrades to a no-op before the host is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("line {line} is out of bounds (buffer has {len} lines)")]
    LineOutOfBounds { line: usize, len: usize },
    #[error("line range {first}..={last} is inverted")]
    InvertedRange { first: usize, last: usize },
}

/// The narrow interface an editor must expose to host the expander.
///
/// The core only ever reads lines, reads the cursor and selection, and
/// issues a single contiguous line-range replacement per invocation. Undo
/// grouping and cursor placement after the edit stay on the host's side.
pub trait EditorHost {
    fn line_count(&self) -> usize;

    /// The line at `index`, without its line ending.
    fn line(&self, index: usize) -> Option<&str>;

    /// The lines `first..=last`, bounds-checked.
    fn lines(&self, first: usize, last: usize) -> Result<Vec<String>, HostError> {
        check_range(first, last, self.line_count())?;
        Ok((first..=last)
            .filter_map(|i| self.line(i).map(String::from))
            .collect())
    }

    /// Replace the lines `first..=last` with `new_lines`, as one edit.
    fn replace_lines(
        &mut self,
        first: usize,
        last: usize,
        new_lines: Vec<String>,
    ) -> Result<(), HostError>;

    fn cursor(&self) -> Position;

    /// The active selection, when the host is in a visual mode.
    fn selection(&self) -> Option<Selection>;
}

fn check_range(first: usize, last: usize, len: usize) -> Result<(), HostError> {
    if first > last {
        return Err(HostError::InvertedRange { first, last });
    }
    if last >= len {
        return Err(HostError::LineOutOfBounds { line: last, len });
    }
    Ok(())
}

/// In-memory [`EditorHost`] used by the test suite and the CLI front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchBuffer {
    lines: Vec<String>,
    cursor: Position,
    selection: Option<Selection>,
}

impl ScratchBuffer {
    /// Build a buffer from text. An empty text is a single empty line.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
            cursor: Position::new(0, 0),
            selection: None,
        }
    }

    /// The buffer content, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor = Position::new(line, column);
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

impl EditorHost for ScratchBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn replace_lines(
        &mut self,
        first: usize,
        last: usize,
        new_lines: Vec<String>,
    ) -> Result<(), HostError> {
        check_range(first, last, self.lines.len())?;
        self.lines.splice(first..=last, new_lines);
        Ok(())
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let buf = ScratchBuffer::new("");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0), Some(""));
    }

    #[test]
    fn test_text_round_trip() {
        let buf = ScratchBuffer::new("a\n\tb\n");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.text(), "a\n\tb\n");
    }

    #[test]
    fn test_lines_range() {
        let buf = ScratchBuffer::new("a\nb\nc");
        assert_eq!(buf.lines(1, 2).unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn test_replace_lines_splices() {
        let mut buf = ScratchBuffer::new("a\nb\nc");
        buf.replace_lines(1, 1, vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(buf.text(), "a\nx\ny\nc");
    }

    #[test]
    fn test_replace_lines_out_of_bounds() {
        let mut buf = ScratchBuffer::new("a");
        assert_eq!(
            buf.replace_lines(0, 3, vec![]),
            Err(HostError::LineOutOfBounds { line: 3, len: 1 })
        );
        assert_eq!(buf.text(), "a");
    }

    #[test]
    fn test_replace_lines_inverted_range() {
        let mut buf = ScratchBuffer::new("a\nb");
        assert_eq!(
            buf.replace_lines(1, 0, vec![]),
            Err(HostError::InvertedRange { first: 1, last: 0 })
        );
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(1, 2) < Position::new(1, 3));
    }
}
