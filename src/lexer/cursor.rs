use crate::location::SourceLocation;
use std::str::Chars;

/// Character cursor that keeps track of where it is in the source.
#[derive(Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        let chars = s.chars();
        Self {
            chars,
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    #[inline]
    pub fn skip_if(&mut self, p: impl FnOnce(char) -> bool) -> bool {
        let skipped = self.peek().filter(|&c| p(c)).is_some();
        if skipped {
            self.take();
        }
        skipped
    }

    pub fn skip_while(&mut self, mut p: impl FnMut(char) -> bool) {
        while self.skip_if(&mut p) {}
    }

    pub fn skip_whitespaces(&mut self) {
        self.skip_while(char::is_whitespace);
    }

    pub fn take(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Byte offset of the next character
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
