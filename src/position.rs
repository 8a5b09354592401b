//! Buffer positions and jump targets

/// Largest column a range can end at; stands for "end of line"
pub const MAX_COLUMN: usize = usize::MAX;

/// A zero-based (line, character) location in a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    /// Character column (not a byte offset)
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    /// Same line, `n` columns to the right
    pub fn shifted(self, n: usize) -> Self {
        Self {
            line: self.line,
            character: self.character.saturating_add(n),
        }
    }
}

/// A span between two positions, normalized so start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range, swapping the endpoints if needed
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range (insertion point)
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Range covering a whole buffer of `line_count` lines
    pub fn whole_buffer(line_count: usize) -> Self {
        Self {
            start: Position::new(0, 0),
            end: Position::new(line_count, MAX_COLUMN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a position is inside the range (end exclusive)
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// A location chosen as a jump target, with the character code it is labelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderTarget {
    pub line: usize,
    pub character: usize,
    pub placeholder: char,
}

impl PlaceholderTarget {
    pub fn new(line: usize, character: usize, placeholder: char) -> Self {
        Self {
            line,
            character,
            placeholder,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_normalizes() {
        let range = Range::new(Position::new(4, 2), Position::new(1, 7));
        assert_eq!(range.start, Position::new(1, 7));
        assert_eq!(range.end, Position::new(4, 2));
    }

    #[test]
    fn test_range_contains() {
        let range = Range::new(Position::new(1, 3), Position::new(2, 0));
        assert!(!range.contains(Position::new(1, 2)));
        assert!(range.contains(Position::new(1, 3)));
        assert!(range.contains(Position::new(1, 500)));
        assert!(!range.contains(Position::new(2, 0)));
    }

    #[test]
    fn test_whole_buffer() {
        let range = Range::whole_buffer(10);
        assert_eq!(range.start, Position::new(0, 0));
        assert_eq!(range.end, Position::new(10, MAX_COLUMN));
        assert!(range.contains(Position::new(9, 1000)));
    }

    #[test]
    fn test_point_is_empty() {
        let point = Range::point(Position::new(3, 6));
        assert!(point.is_empty());
        assert!(!point.contains(Position::new(3, 6)));
    }
}
