use crate::lexer::{Token, TokenKind};
use crate::location::SourceLocation;
use crate::parser::{ParseError, Result};

static EOF: Token<'static> = Token::new(TokenKind::Eof, "", SourceLocation::UNKNOWN);

/// Token stream with bounded lookahead.
///
/// Reading past the end yields a synthesized [TokenKind::Eof] with an invalid location,
/// so an empty slice is a valid stream.
#[derive(Debug)]
pub struct Cursor<'a, 'src> {
    tokens: &'a [Token<'src>],
    position: usize,
}

impl<'a, 'src> Cursor<'a, 'src> {
    pub fn new(tokens: &'a [Token<'src>]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn peek(&self) -> &'a Token<'src> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, n: usize) -> &'a Token<'src> {
        self.tokens.get(self.position + n).unwrap_or(&EOF)
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub fn location(&self) -> SourceLocation {
        self.peek().location
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn at_end(&self) -> bool {
        self.peek_is(TokenKind::Eof)
    }

    /// Consumes and returns the current token. The end of input is never consumed.
    pub fn bump(&mut self) -> &'a Token<'src> {
        let token = self.peek();
        if !self.at_end() {
            self.position += 1;
        }
        token
    }

    pub fn bump_if(&mut self, kind: TokenKind) -> bool {
        let condition = self.peek_is(kind);
        if condition {
            self.bump();
        }
        condition
    }

    /// Consumes the current token if it has the expected kind; otherwise leaves it in place.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token<'src>> {
        let next = self.peek();
        if next.is(kind) {
            Ok(self.bump())
        } else {
            Err(ParseError::ExpectedButGot {
                expected: kind,
                got: next.kind,
            })
        }
    }

    pub fn expect_identifier(&mut self) -> Result<&'a Token<'src>> {
        let next = self.peek();
        if next.is(TokenKind::Identifier) {
            Ok(self.bump())
        } else {
            Err(ParseError::ExpectedIdentifierButGot(next.kind))
        }
    }
}
