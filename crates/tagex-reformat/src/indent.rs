/// One level of indentation, learned from the buffer being edited.
///
/// The engine reads the unit from context rather than assuming one, so a
/// tab-indented buffer keeps tabs and a two-space buffer keeps two spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndentUnit {
    Tab,
    Spaces(usize),
}

impl IndentUnit {
    /// Learn the indent unit from existing lines.
    ///
    /// The first line leading with a tab decides `Tab`; otherwise the
    /// smallest non-zero leading space run of any non-blank line decides
    /// `Spaces(n)`. A buffer with no indented lines defaults to `Tab`.
    pub fn detect<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut min_spaces: Option<usize> = None;

        for line in lines {
            match line.chars().next() {
                Some('\t') => return Self::Tab,
                Some(' ') => {
                    let run = line.chars().take_while(|&c| c == ' ').count();
                    // Whitespace-only lines carry no signal.
                    if line.chars().nth(run).is_some() {
                        min_spaces = Some(min_spaces.map_or(run, |m| m.min(run)));
                    }
                }
                _ => {}
            }
        }

        match min_spaces {
            Some(n) => Self::Spaces(n),
            None => Self::Tab,
        }
    }

    /// Whole unit repetitions leading the line.
    pub fn indent_of(&self, line: &str) -> usize {
        match self {
            Self::Tab => line.chars().take_while(|&c| c == '\t').count(),
            Self::Spaces(0) => 0,
            Self::Spaces(n) => line.chars().take_while(|&c| c == ' ').count() / n,
        }
    }

    /// Prefix `text` with `level` repetitions of the unit. Blank text renders
    /// as an empty line, never as trailing indentation.
    pub fn render(&self, level: usize, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let mut line = self.one().repeat(level);
        line.push_str(text);
        line
    }

    fn one(&self) -> String {
        match self {
            Self::Tab => "\t".to_string(),
            Self::Spaces(n) => " ".repeat(*n),
        }
    }
}
