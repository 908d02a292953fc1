use tagex_locator::{locate, Span, Strategy, Tag};

/// Tag content split at nested tag boundaries.
///
/// The reformatter recurses over this instead of splicing strings: text
/// stays text, a complete nested pair becomes an [`Element`](Piece::Element)
/// with its own content to recurse into.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Text(String),
    Element(Tag),
}

/// Split the `content` span of `text` into pieces by repeatedly locating the
/// first complete tag pair in what remains. Text between and around pairs is
/// kept verbatim; trimming is the emitter's business.
pub fn split(text: &str, content: Span) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut rest = content.start..content.end;

    while let Some(tag) = locate(text, rest.clone(), &Strategy::Selection) {
        if tag.open.start > rest.start {
            pieces.push(Piece::Text(slice(text, rest.start, tag.open.start)));
        }
        rest = tag.close.end..rest.end;
        pieces.push(Piece::Element(tag));
    }

    if rest.start < rest.end {
        pieces.push(Piece::Text(slice(text, rest.start, rest.end)));
    }

    pieces
}

/// Slice `text` by char offsets.
pub(crate) fn slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}
