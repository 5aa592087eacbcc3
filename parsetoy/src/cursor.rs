use std::fmt;

/// A 0-based line/column position in source text.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source range: `[start, end)`.
///
/// `Span` marks the region of source text that a token covers. Reduced
/// tokens cover the union of the tokens they were built from.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Start (or restart) this span at its current `end` position (empty span at end).
    /// Effect: span(x,y, z,w) -> span(z,w, z,w)
    pub fn collapse(&mut self) {
        self.start = self.end;
    }

    /// Merge with another span by covering both.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start <= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end >= other.end {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }

    /// Pretty-print for diagnostics (human-readable).
    #[inline]
    pub fn display(&self) -> String {
        format!(
            "span {}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Merges two optional spans; a missing side leaves the other unchanged.
pub fn merge_spans(a: Option<Span>, b: Option<Span>) -> Option<Span> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Tracks the current lexical position over a `&str` input.
///
/// `pos` is a byte offset into the input, always on a `char` boundary.
/// `span` covers the most recently consumed run of text.
#[derive(Debug, Clone, Default)]
pub struct LexerCursor {
    pub pos: usize,
    pub span: Span,
}

impl LexerCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by consuming a char `c`, updating the span end.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.span.end.line += 1;
            self.span.end.column = 0;
        } else {
            self.span.end.column += 1;
        }
        self.pos += c.len_utf8();
    }

    /// Consume `text` as a single unit; afterwards `span` covers exactly `text`.
    pub fn consume(&mut self, text: &str) -> Span {
        self.span.collapse();
        for c in text.chars() {
            self.advance(c);
        }
        self.span
    }

    /// Position of the next unconsumed char.
    pub fn position(&self) -> Position {
        self.span.end
    }
}

/// Build an `Option<Span>` inline from 0-based line/column coordinates.
///
/// # Examples
///
/// ```rust
/// # use parsetoy::span;
/// let s = span!(0, 0, 1, 4);
/// assert_eq!(s.unwrap().end.column, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        Some($crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(sl: usize, sc: usize, el: usize, ec: usize) -> Span {
        Span::new(Position::new(sl, sc), Position::new(el, ec))
    }

    #[test]
    fn consume_tracks_columns_on_one_line() {
        let mut cursor = LexerCursor::new();
        assert_eq!(cursor.consume("12"), sp(0, 0, 0, 2));
        assert_eq!(cursor.consume(" "), sp(0, 2, 0, 3));
        assert_eq!(cursor.pos, 3);
    }

    #[test]
    fn newline_moves_to_next_line() {
        let mut cursor = LexerCursor::new();
        cursor.consume("1 +\n ");
        assert_eq!(cursor.position(), Position::new(1, 1));
        assert_eq!(cursor.consume("2"), sp(1, 1, 1, 2));
    }

    #[test]
    fn pos_counts_bytes_and_column_counts_chars() {
        let mut cursor = LexerCursor::new();
        cursor.consume("é");
        assert_eq!(cursor.pos, 2);
        assert_eq!(cursor.position(), Position::new(0, 1));
    }

    #[test]
    fn merge_covers_both_spans() {
        let m = sp(1, 5, 2, 3).merge(&sp(0, 9, 3, 1));
        assert_eq!(m, sp(0, 9, 3, 1));
        let inner = sp(5, 2, 5, 10).merge(&sp(5, 4, 5, 7));
        assert_eq!(inner, sp(5, 2, 5, 10));
    }

    #[test]
    fn merge_spans_handles_missing_sides() {
        assert_eq!(merge_spans(None, None), None);
        assert_eq!(merge_spans(span!(0, 1, 0, 2), None), span!(0, 1, 0, 2));
        assert_eq!(merge_spans(None, span!(0, 1, 0, 2)), span!(0, 1, 0, 2));
        assert_eq!(
            merge_spans(span!(0, 0, 0, 1), span!(0, 4, 0, 5)),
            span!(0, 0, 0, 5)
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(sp(1, 2, 1, 10).display(), "span 1:2 to 1:10");
        assert_eq!(Position::new(3, 4).to_string(), "3:4");
    }
}
