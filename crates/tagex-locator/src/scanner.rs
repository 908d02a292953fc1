use crate::token::{Span, Token, TokenKind};

/// Markup tag scanner.
///
/// Walks a text once and emits a token for every complete opening or closing
/// tag, leaving everything else (text content, stray brackets, processing
/// instructions) unrepresented. The scanner is deliberately forgiving: a
/// malformed construct never produces an error, it only reduces the set of
/// tokens the locator gets to work with.
///
/// Opacity rules:
/// - Inside an opening tag, single- or double-quoted attribute values are
///   opaque: `<`, `>` and sequences like `<?= $href ?>` within them never
///   start or end a tag.
/// - Outside quotes, the first `>` terminates the opening tag; attribute
///   text between the name and that `>` is captured raw.
/// - `<?` and `<!` blocks are skipped up to their terminating `>`.
/// - An opening tag with no terminating `>` before end of input aborts the
///   scan at that point (nothing after it can be trusted).
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given text.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Scan the entire text into a vector of tag tokens.
    pub fn tokenize(text: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(text);
        scanner.scan_tokens();
        scanner.tokens
    }

    fn scan_tokens(&mut self) {
        while !self.is_at_end() {
            if self.peek() == '<' {
                self.scan_angle();
            } else {
                self.advance();
            }
        }
    }

    /// Dispatch on the character after a `<`.
    fn scan_angle(&mut self) {
        match self.peek_next() {
            Some('/') => self.scan_close_tag(),
            Some('?') | Some('!') => self.skip_instruction(),
            Some(c) if is_name_start(c) => self.scan_open_tag(),
            // Stray `<` (comparison operator, malformed markup): plain text.
            _ => self.advance(),
        }
    }

    /// Scan `<name attributes>` and emit an `Open` token.
    fn scan_open_tag(&mut self) {
        let start = self.pos;
        self.advance(); // consume `<`
        let name = self.scan_name();

        let attr_start = self.pos;
        loop {
            if self.is_at_end() {
                // Unterminated opening tag: abort the scan here.
                return;
            }
            match self.peek() {
                '"' | '\'' => {
                    if !self.skip_quoted() {
                        return;
                    }
                }
                '>' => break,
                _ => self.advance(),
            }
        }

        let attributes: String = self.chars[attr_start..self.pos].iter().collect();
        self.advance(); // consume `>`
        self.emit(TokenKind::Open { name, attributes }, start);
    }

    /// Scan `</name>` and emit a `Close` token.
    fn scan_close_tag(&mut self) {
        let start = self.pos;
        self.advance(); // consume `<`
        self.advance(); // consume `/`

        if self.is_at_end() || !is_name_start(self.peek()) {
            // `</>` or similar: not a closing tag, keep scanning as text.
            return;
        }
        let name = self.scan_name();

        // Tolerate whitespace (or junk) between the name and the `>`.
        while !self.is_at_end() && self.peek() != '>' {
            self.advance();
        }
        if self.is_at_end() {
            return;
        }

        self.advance(); // consume `>`
        self.emit(TokenKind::Close { name }, start);
    }

    /// Skip a `<? ... ?>` or `<! ... >` block. Emits nothing.
    fn skip_instruction(&mut self) {
        self.advance(); // consume `<`
        while !self.is_at_end() && self.peek() != '>' {
            self.advance();
        }
        if !self.is_at_end() {
            self.advance(); // consume `>`
        }
    }

    /// Scan a tag name: `[A-Za-z0-9][A-Za-z0-9-]*`.
    fn scan_name(&mut self) -> String {
        let mut name = String::new();
        while !self.is_at_end() && is_name_char(self.peek()) {
            name.push(self.peek());
            self.advance();
        }
        name
    }

    /// Skip a quoted run including both quotes. Returns false when the quote
    /// never closes (malformed tag, scan aborts).
    fn skip_quoted(&mut self) -> bool {
        let quote = self.peek();
        self.advance(); // consume opening quote
        while !self.is_at_end() && self.peek() != quote {
            self.advance();
        }
        if self.is_at_end() {
            return false;
        }
        self.advance(); // consume closing quote
        true
    }

    fn emit(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.pos)));
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

/// Tag names are letters, digits and hyphens; the first character must not
/// be `/`, `?` or `!` (those route elsewhere) and must be alphanumeric.
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}
