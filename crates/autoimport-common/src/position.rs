//! Line/column positions computed from byte offsets.

use serde::Serialize;

/// A zero-based line and character (byte column) position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Start offsets of every line in a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map. `\r\n`, `\n` and lone `\r` all terminate a line.
    pub fn build(text: &str) -> LineMap {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        let mut pos = 0usize;
        while let Some(found) = memchr::memchr2(b'\n', b'\r', &bytes[pos..]) {
            let at = pos + found;
            let next = if bytes[at] == b'\r' && bytes.get(at + 1) == Some(&b'\n') {
                at + 2
            } else {
                at + 1
            };
            line_starts.push(next as u32);
            pos = next;
        }
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a zero-based position.
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line as u32, offset - self.line_starts[line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_position_handles_mixed_line_endings() {
        let map = LineMap::build("a\nbc\r\nd\re");
        assert_eq!(map.line_count(), 4);
        assert_eq!(map.offset_to_position(0), Position::new(0, 0));
        assert_eq!(map.offset_to_position(3), Position::new(1, 1));
        assert_eq!(map.offset_to_position(6), Position::new(2, 0));
        assert_eq!(map.offset_to_position(8), Position::new(3, 0));
    }
}
