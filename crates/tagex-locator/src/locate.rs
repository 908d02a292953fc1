use std::ops::Range;

use crate::scanner::Scanner;
use crate::token::{Span, Token, TokenKind};

/// A matched tag pair within a scanned text.
///
/// Invariant: `open` precedes `content` precedes `close`, non-overlapping,
/// all char-offset spans into the same text.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    /// Raw text between the tag name and the terminating `>` of the opening
    /// tag. Opaque: never re-parsed as tags.
    pub attributes: String,
    /// The literal opening tag text, `<name ...>`.
    pub open: Span,
    /// Strictly between the opening and closing tags.
    pub content: Span,
    /// The literal closing tag text, `</name>`.
    pub close: Span,
}

impl Tag {
    /// Full outer span, from the opening `<` to the closing tag's `>`.
    pub fn outer(&self) -> Span {
        Span::new(self.open.start, self.close.end)
    }
}

/// How the locator chooses among candidate tag pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Innermost matched pair whose outer span contains the offset. When the
    /// cursor rests outside every pair (on leading indentation, say), the
    /// first matched pair opening inside the search window.
    Cursor(usize),
    /// First matched pair opening at or after the search start whose close
    /// ends at or before the search end.
    Selection,
}

/// Find the tag pair a cursor or selection is aiming at.
///
/// Opening tags must begin inside `search`; the matching close may sit
/// anywhere later in `text` for [`Strategy::Cursor`], but must end inside
/// `search` for [`Strategy::Selection`]. Returns `None` when no complete
/// pair qualifies; the caller treats that as a no-op.
pub fn locate(text: &str, search: Range<usize>, strategy: &Strategy) -> Option<Tag> {
    let tokens = Scanner::tokenize(text);

    // Candidates in open-order: every matched pair whose open starts in the
    // search window. Opens with no same-name close (`<br/>`, orphans) are
    // silently skipped.
    let candidates: Vec<Tag> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_open() && search.contains(&t.span.start))
        .filter_map(|(i, _)| match_pair(&tokens, i))
        .collect();

    match strategy {
        Strategy::Cursor(offset) => candidates
            .iter()
            .filter(|t| t.outer().contains(*offset))
            .max_by_key(|t| t.open.start)
            .or_else(|| candidates.first())
            .cloned(),
        Strategy::Selection => candidates
            .iter()
            .find(|t| t.close.end <= search.end)
            .cloned(),
    }
}

/// Pair the open token at `index` with the close that brings its same-name
/// depth back to zero. Other names never affect the depth.
fn match_pair(tokens: &[Token], index: usize) -> Option<Tag> {
    let (name, attributes) = match &tokens[index].kind {
        TokenKind::Open { name, attributes } => (name.clone(), attributes.clone()),
        TokenKind::Close { .. } => return None,
    };

    let mut depth = 1usize;
    for token in &tokens[index + 1..] {
        match &token.kind {
            TokenKind::Open { name: n, .. } if *n == name => depth += 1,
            TokenKind::Close { name: n } if *n == name => {
                depth -= 1;
                if depth == 0 {
                    let open = tokens[index].span;
                    return Some(Tag {
                        name,
                        attributes,
                        open,
                        content: Span::new(open.end, token.span.start),
                        close: token.span,
                    });
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full(text: &str) -> Range<usize> {
        0..text.chars().count()
    }

    /// Helper: locate over the whole text with a cursor strategy.
    fn at_cursor(text: &str, offset: usize) -> Option<Tag> {
        locate(text, full(text), &Strategy::Cursor(offset))
    }

    // =========================================================================
    // Pair matching
    // =========================================================================

    #[test]
    fn test_simple_pair() {
        let tag = at_cursor("<a>x</a>", 0).unwrap();
        assert_eq!(tag.name, "a");
        assert_eq!(tag.open, Span::new(0, 3));
        assert_eq!(tag.content, Span::new(3, 4));
        assert_eq!(tag.close, Span::new(4, 8));
    }

    #[test]
    fn test_empty_content_span() {
        let tag = at_cursor("<a></a>", 0).unwrap();
        assert!(tag.content.is_empty());
    }

    #[test]
    fn test_same_name_nesting_depth() {
        // The outer div must match the *last* </div>, not the first.
        let text = "<div><div>x</div></div>";
        let tag = at_cursor(text, 0).unwrap();
        assert_eq!(tag.outer(), Span::new(0, text.chars().count()));
    }

    #[test]
    fn test_other_names_do_not_affect_depth() {
        let tag = at_cursor("<ul><li>x</li></ul>", 0).unwrap();
        assert_eq!(tag.name, "ul");
        assert_eq!(tag.close, Span::new(14, 19));
    }

    #[test]
    fn test_unmatched_open_is_skipped() {
        // `<br/>` never closes; the only candidate pair is the <a>.
        let tag = at_cursor("<br/><a>x</a>", 0).unwrap();
        assert_eq!(tag.name, "a");
    }

    #[test]
    fn test_orphan_close_is_skipped() {
        let tag = at_cursor("</b><a>x</a>", 0).unwrap();
        assert_eq!(tag.name, "a");
    }

    #[test]
    fn test_no_pair_at_all() {
        assert_eq!(at_cursor("bla bla bla", 0), None);
        assert_eq!(at_cursor("<br/>", 0), None);
    }

    // =========================================================================
    // Cursor strategy
    // =========================================================================

    #[test]
    fn test_cursor_picks_innermost() {
        let s = "<ul> <a href=\"#\">bla</a> </ul>";
        // Cursor inside the link content.
        let tag = at_cursor(s, 18).unwrap();
        assert_eq!(tag.name, "a");
        // Cursor on the opening <ul>.
        let tag = at_cursor(s, 1).unwrap();
        assert_eq!(tag.name, "ul");
    }

    #[test]
    fn test_cursor_on_indentation_falls_back_to_first() {
        // Cursor at offset 0 sits on the tab, outside the tag's span.
        let tag = at_cursor("\t<a href=\"#\">bla</a>", 0).unwrap();
        assert_eq!(tag.name, "a");
    }

    #[test]
    fn test_cursor_search_window_limits_opens() {
        // Only opens starting inside the window qualify; the close may be
        // past it.
        let text = "<a>first</a> <b>second</b>";
        let tag = locate(text, 0..4, &Strategy::Cursor(0)).unwrap();
        assert_eq!(tag.name, "a");
        assert_eq!(locate(text, 4..12, &Strategy::Cursor(5)), None);
    }

    #[test]
    fn test_cursor_close_may_be_outside_window() {
        let text = "<a>\n\tbla\n</a>";
        let tag = locate(text, 0..3, &Strategy::Cursor(0)).unwrap();
        assert_eq!(tag.close, Span::new(9, 13));
    }

    // =========================================================================
    // Selection strategy
    // =========================================================================

    #[test]
    fn test_selection_picks_first_contained_pair() {
        let text = "<b>x</b> <a>y</a>";
        let tag = locate(text, full(text), &Strategy::Selection).unwrap();
        assert_eq!(tag.name, "b");
    }

    #[test]
    fn test_selection_requires_close_inside() {
        // Selection covers only the opening tag; the pair does not qualify.
        let text = "<a>bla</a>";
        assert_eq!(locate(text, 0..3, &Strategy::Selection), None);
    }

    #[test]
    fn test_selection_exactly_bracketing_a_tag() {
        // A "tag object" pre-selection: the span is exactly the outer text.
        let text = "\t<a href=\"#\">bla</a>";
        let tag = locate(text, 1..text.chars().count(), &Strategy::Selection).unwrap();
        assert_eq!(tag.name, "a");
        assert_eq!(tag.outer(), Span::new(1, 20));
    }

    #[test]
    fn test_selection_skips_unclosable_first_open() {
        let text = "<br/><a>x</a>";
        let tag = locate(text, full(text), &Strategy::Selection).unwrap();
        assert_eq!(tag.name, "a");
    }
}
