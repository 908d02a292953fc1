use tagex_locator::Tag;

use crate::content::{slice, split, Piece};
use crate::indent::IndentUnit;

/// Replacement lines for the full line range containing a located tag.
///
/// Line indexes are region-relative (0-based, inclusive); the caller maps
/// them onto its buffer before applying the edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Reformatted {
    pub first_line: usize,
    pub last_line: usize,
    pub lines: Vec<String>,
}

/// Rewrite a located tag into multi-line form.
///
/// Replaces the lines from the opening tag's line through the closing tag's
/// line with: preceding sibling text (if the opening tag shared its line
/// with content), the opening tag, the content one level deeper (nested
/// pairs expanded recursively), the closing tag, and following sibling text.
/// Whitespace-only content between sibling tag boundaries is dropped
/// entirely; text content is trimmed at both edges, interior blank lines
/// survive as blank output lines.
pub fn reformat(text: &str, tag: &Tag, unit: &IndentUnit) -> Reformatted {
    let starts = line_starts(text);
    let first_line = line_of(&starts, tag.open.start);
    let last_line = line_of(&starts, tag.close.end.saturating_sub(1));

    let open_line = slice(text, starts[first_line], line_end(text, &starts, first_line));
    let base = unit.indent_of(&open_line);

    let mut lines = Vec::new();

    let before = slice(text, starts[first_line], tag.open.start);
    let before = before.trim();
    if !before.is_empty() {
        lines.push(unit.render(base, before));
    }

    emit_tag(text, tag, base, unit, &mut lines);

    let after = slice(text, tag.close.end, line_end(text, &starts, last_line));
    let after = after.trim();
    if !after.is_empty() {
        lines.push(unit.render(base, after));
    }

    Reformatted {
        first_line,
        last_line,
        lines,
    }
}

/// One tag block: open line, content pieces one level deeper, close line.
fn emit_tag(text: &str, tag: &Tag, level: usize, unit: &IndentUnit, out: &mut Vec<String>) {
    out.push(unit.render(level, &slice(text, tag.open.start, tag.open.end)));

    for piece in split(text, tag.content) {
        match piece {
            Piece::Element(nested) => emit_tag(text, &nested, level + 1, unit, out),
            Piece::Text(t) => emit_text(&t, level + 1, unit, out),
        }
    }

    out.push(unit.render(level, &slice(text, tag.close.start, tag.close.end)));
}

/// A text piece, trimmed at both edges. Interior blank lines stay blank,
/// interior whitespace within a line is untouched.
fn emit_text(piece: &str, level: usize, unit: &IndentUnit, out: &mut Vec<String>) {
    let trimmed = piece.trim();
    if trimmed.is_empty() {
        return;
    }
    for line in trimmed.lines() {
        out.push(unit.render(level, line.trim()));
    }
}

/// Char offsets at which each line of `text` starts.
fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, c) in text.chars().enumerate() {
        if c == '\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Index of the line containing the char offset.
fn line_of(starts: &[usize], offset: usize) -> usize {
    match starts.binary_search(&offset) {
        Ok(i) => i,
        Err(i) => i - 1,
    }
}

/// Char offset one past the last content char of the line (its `\n` excluded).
fn line_end(text: &str, starts: &[usize], line: usize) -> usize {
    match starts.get(line + 1) {
        Some(next) => next - 1,
        None => text.chars().count(),
    }
}
