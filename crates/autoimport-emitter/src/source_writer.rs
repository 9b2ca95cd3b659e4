//! Output buffer for emitted text.

/// Line terminator used for inserted text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    /// Pick the terminator a source file already uses: CRLF when the first
    /// line break is CRLF, LF otherwise.
    pub fn detect(text: &str) -> NewLineKind {
        match memchr::memchr(b'\n', text.as_bytes()) {
            Some(i) if i > 0 && text.as_bytes()[i - 1] == b'\r' => {
                NewLineKind::CarriageReturnLineFeed
            }
            _ => NewLineKind::LineFeed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NewLineKind::LineFeed => "\n",
            NewLineKind::CarriageReturnLineFeed => "\r\n",
        }
    }
}

/// Append-only writer the printer emits into.
#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    new_line: NewLineKind,
}

impl SourceWriter {
    pub fn new(new_line: NewLineKind) -> SourceWriter {
        SourceWriter {
            output: String::new(),
            new_line,
        }
    }

    pub fn with_capacity(capacity: usize, new_line: NewLineKind) -> SourceWriter {
        SourceWriter {
            output: String::with_capacity(capacity),
            new_line,
        }
    }

    #[inline]
    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    #[inline]
    pub fn write_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    #[inline]
    pub fn write_space(&mut self) {
        self.output.push(' ');
    }

    pub fn write_line(&mut self) {
        self.output.push_str(self.new_line.as_str());
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn take_output(self) -> String {
        self.output
    }
}
