mod cursor;
mod lexer_error;
#[cfg(test)]
mod lexer_tests;
mod token;

use crate::diagnostics::ErrorReporter;
use cursor::Cursor;
pub use lexer_error::LexError;
pub use token::{Token, TokenKind};

/// Streaming tokenizer.
///
/// [next_token](Lexer::next_token) never fails: characters that do not start any token
/// come back as [TokenKind::Error] tokens and lexing continues after them.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
}

#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
        }
    }

    /// Skips whitespace and returns exactly one token. Returns [TokenKind::Eof] once
    /// the input is exhausted, and keeps returning it.
    pub fn next_token(&mut self) -> Token<'src> {
        self.cursor.skip_whitespaces();
        let location = self.cursor.location();
        let start = self.cursor.offset();

        let Some(c) = self.cursor.take() else {
            return Token::new(TokenKind::Eof, "", location);
        };

        let kind = match c {
            '!' => self.lex_mchar('=', TokenKind::IsNotEqual, TokenKind::LogicalNot),
            '=' => self.lex_mchar('=', TokenKind::IsEqual, TokenKind::Assign),
            '&' => self.lex_mchar('&', TokenKind::LogicalAnd, TokenKind::BitwiseAnd),
            '|' => self.lex_mchar('|', TokenKind::LogicalOr, TokenKind::BitwiseOr),
            '<' => self
                .lex_angle('<', TokenKind::ShiftLeft, TokenKind::IsLessThanOrEqual)
                .unwrap_or(TokenKind::IsLessThan),
            '>' => self
                .lex_angle('>', TokenKind::ShiftRight, TokenKind::IsGreaterThanOrEqual)
                .unwrap_or(TokenKind::IsGreaterThan),
            c if is_identifier_start(c) => {
                self.cursor.skip_while(is_identifier_continue);
                TokenKind::from(&self.source[start..self.cursor.offset()])
            }
            '0'..='9' => {
                self.cursor.skip_while(|c| c.is_ascii_digit());
                TokenKind::Constant
            }
            c => TokenKind::try_from(c).unwrap_or(TokenKind::Error),
        };

        let lexeme = &self.source[start..self.cursor.offset()];
        Token::new(kind, lexeme, location)
    }

    fn lex_mchar(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.cursor.skip_if(|c| c == second) {
            double
        } else {
            single
        }
    }

    fn lex_angle(
        &mut self,
        same: char,
        shift: TokenKind,
        or_equal: TokenKind,
    ) -> Option<TokenKind> {
        match self.cursor.peek()? {
            c if c == same => {
                self.cursor.take();
                Some(shift)
            }
            '=' => {
                self.cursor.take();
                Some(or_equal)
            }
            _ => None,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    /// Yields tokens up to, but not including, the end of input.
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}

/// Lexes the whole source, reporting and dropping every [TokenKind::Error] token.
///
/// The returned vector always ends with a single [TokenKind::Eof] token.
pub fn tokenize<'src>(source: &'src str, reporter: &mut ErrorReporter) -> Vec<Token<'src>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Eof => {
                tokens.push(token);
                break;
            }
            TokenKind::Error => {
                let err = LexError::UnexpectedChar(token.lexeme.to_owned());
                reporter.report(&err, token.location);
            }
            _ => tokens.push(token),
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    tokens
}
