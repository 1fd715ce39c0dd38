//! The character abstraction the regex layer is parameterized over
//! (spec §3: "the regex layer parameterizes over a Char-like type so the
//! lexer can enrich characters with positions without the regex engine
//! caring").

/// Anything that can stand in for a character: a bare `char`, or a `char`
/// enriched with a [`Position`] the way the lexer's character stream is.
pub trait CharLike {
    fn code_point(&self) -> char;
}

impl CharLike for char {
    fn code_point(&self) -> char {
        *self
    }
}

/// A zero-based (line, column) pair, attached to each character and carried
/// onto each token (spec §3). Advancing past `\n` increments the line and
/// resets the column; any other character increments the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position { line: 0, column: 0 }
    }

    /// The position immediately after consuming `ch` at `self`.
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Position { line: self.line + 1, column: 0 }
        } else {
            Position { line: self.line, column: self.column + 1 }
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single code point plus its position — the item type the lexer's
/// character stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedChar {
    pub ch: char,
    pub position: Position,
}

impl CharLike for PositionedChar {
    fn code_point(&self) -> char {
        self.ch
    }
}

/// Assigns positions to every character of `input`, in order.
pub fn positioned_chars(input: &str) -> Vec<PositionedChar> {
    let mut position = Position::start();
    let mut out = Vec::with_capacity(input.len());
    for ch in input.chars() {
        out.push(PositionedChar { ch, position });
        position = position.advance(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_increments_line_and_resets_column() {
        let chars = positioned_chars("ab\ncd");
        assert_eq!(chars[0].position, Position { line: 0, column: 0 });
        assert_eq!(chars[1].position, Position { line: 0, column: 1 });
        assert_eq!(chars[2].position, Position { line: 0, column: 2 }); // the '\n' itself
        assert_eq!(chars[3].position, Position { line: 1, column: 0 });
        assert_eq!(chars[4].position, Position { line: 1, column: 1 });
    }
}
