mod cursor;
mod parse_error;

use crate::ast::*;
use crate::diagnostics::ErrorReporter;
use crate::lexer::{Token, TokenKind};
use crate::location::SourceLocation;
use crate::types::TypeRegistry;
use cursor::Cursor;
pub use parse_error::{ParseError, Result};

/// Deepest accepted nesting of `(`, `!` and `{`.
pub const MAX_NESTING: usize = 256;
/// Most binary operators accepted in one expression.
pub const MAX_OPERATORS: usize = 1024;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ParserOptions {
    /// Accept `struct Name { ... }` at statement level
    pub enable_structs: bool,
}

#[allow(clippy::match_same_arms)]
fn get_prec(op: Operator) -> u8 {
    match op {
        Operator::Multiply | Operator::Div | Operator::Mod => 10,
        Operator::Add | Operator::Subtract => 9,
        Operator::ShiftLeft | Operator::ShiftRight => 8,
        Operator::LessThan
        | Operator::GreaterThan
        | Operator::LessOrEqual
        | Operator::GreaterOrEqual => 7,
        Operator::IsEqual | Operator::IsNotEqual => 6,
        Operator::BitwiseAnd => 5,
        Operator::BitwiseXor => 4,
        Operator::BitwiseOr => 3,
        Operator::LogicalAnd => 2,
        Operator::LogicalOr => 1,
        Operator::Not => 0,
    }
}

impl TryFrom<TokenKind> for Operator {
    type Error = TokenKind;
    fn try_from(value: TokenKind) -> std::result::Result<Self, TokenKind> {
        match value {
            TokenKind::Plus => Ok(Self::Add),
            TokenKind::Hyphen => Ok(Self::Subtract),
            TokenKind::Asterisk => Ok(Self::Multiply),
            TokenKind::FSlash => Ok(Self::Div),
            TokenKind::Percent => Ok(Self::Mod),
            TokenKind::LogicalAnd => Ok(Self::LogicalAnd),
            TokenKind::LogicalOr => Ok(Self::LogicalOr),
            TokenKind::IsEqual => Ok(Self::IsEqual),
            TokenKind::IsNotEqual => Ok(Self::IsNotEqual),
            TokenKind::IsLessThan => Ok(Self::LessThan),
            TokenKind::IsLessThanOrEqual => Ok(Self::LessOrEqual),
            TokenKind::IsGreaterThan => Ok(Self::GreaterThan),
            TokenKind::IsGreaterThanOrEqual => Ok(Self::GreaterOrEqual),
            TokenKind::BitwiseAnd => Ok(Self::BitwiseAnd),
            TokenKind::BitwiseOr => Ok(Self::BitwiseOr),
            TokenKind::BitwiseXor => Ok(Self::BitwiseXor),
            TokenKind::ShiftLeft => Ok(Self::ShiftLeft),
            TokenKind::ShiftRight => Ok(Self::ShiftRight),
            _ => Err(value),
        }
    }
}

/// Recursive-descent parser.
///
/// Parsing is total: every grammar violation is reported, replaced by an error node and
/// followed by [synchronize_tokens](Parser::synchronize_tokens).
pub struct Parser<'a, 'src> {
    cursor: Cursor<'a, 'src>,
    reporter: &'a mut ErrorReporter,
    registry: &'a mut TypeRegistry,
    builder: AstBuilder,
    options: ParserOptions,
    depth: usize,
    operators: usize,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub fn new(
        tokens: &'a [Token<'src>],
        reporter: &'a mut ErrorReporter,
        registry: &'a mut TypeRegistry,
        options: ParserOptions,
    ) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            reporter,
            registry,
            builder: AstBuilder::new(),
            options,
            depth: 0,
            operators: 0,
        }
    }

    pub fn parse(mut self) -> Program {
        let mut statements = Vec::new();

        loop {
            match self.cursor.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.cursor.bump();
                }
                _ => statements.push(self.parse_statement()),
            }
        }

        tracing::debug!(statements = statements.len(), "parsed program");
        self.builder.program(statements)
    }

    /// Discards tokens after an error.
    ///
    /// The offending token is always dropped. After it, stops at end of input, in front
    /// of `if`/`while`/`return`/`struct`, or right after `;`/`}`. Returns the number of
    /// discarded tokens, which is zero only at end of input.
    pub fn synchronize_tokens(&mut self) -> usize {
        let start = self.cursor.position();
        let first = self.cursor.bump();

        if !first.kind.ends_statement() {
            loop {
                let next = self.cursor.peek().kind;
                if next == TokenKind::Eof || next.starts_statement() {
                    break;
                }
                self.cursor.bump();
                if next.ends_statement() {
                    break;
                }
            }
        }

        let skipped = self.cursor.position() - start;
        tracing::debug!(skipped, "synchronized token stream");
        skipped
    }

    fn report(&mut self, err: &ParseError, location: SourceLocation) {
        if let ParseError::AbandonedStatement = err {
            tracing::debug!(%location, "{err}");
            return;
        }
        self.reporter.report(err, location);
    }

    /// Like [expect](Cursor::expect), but a delimiter missing behind an already reported
    /// malformed `value` abandons the statement silently.
    fn expect_after(&mut self, value: &Expression, kind: TokenKind) -> Result<()> {
        match self.cursor.expect(kind) {
            Ok(_) => Ok(()),
            Err(_) if value.contains_error() => Err(ParseError::AbandonedStatement),
            Err(err) => Err(err),
        }
    }

    fn recover(&mut self, err: &ParseError, location: SourceLocation) -> Statement {
        let at = self.cursor.location();
        self.report(err, at);
        self.synchronize_tokens();
        self.builder.statement_error(location)
    }

    fn parse_statement(&mut self) -> Statement {
        let location = self.cursor.location();
        let statement = match self.cursor.peek().kind {
            TokenKind::Break => self.parse_break(),
            TokenKind::Continue => self.parse_continue(),
            TokenKind::If => self.parse_if(),
            TokenKind::Return => self.parse_return(),
            TokenKind::While => self.parse_while(),
            TokenKind::Int | TokenKind::Bool => self.parse_declaration(),
            TokenKind::Identifier => self.parse_statement_identifier(),
            TokenKind::OpenCurly => Ok(self
                .parse_nested_scope()
                .map_or_else(|| self.builder.statement_error(location), Statement::Scope)),
            TokenKind::Struct if self.options.enable_structs => self.parse_struct(),
            kind => Err(ParseError::NoStatementFound(kind)),
        };
        statement.unwrap_or_else(|err| self.recover(&err, location))
    }

    fn parse_break(&mut self) -> Result<Statement> {
        let location = self.cursor.bump().location;
        self.cursor.expect(TokenKind::Semicolon)?;
        Ok(self.builder.break_statement(location))
    }

    fn parse_continue(&mut self) -> Result<Statement> {
        let location = self.cursor.bump().location;
        self.cursor.expect(TokenKind::Semicolon)?;
        Ok(self.builder.continue_statement(location))
    }

    fn parse_return(&mut self) -> Result<Statement> {
        let location = self.cursor.bump().location;
        let value = self.parse_value();
        self.expect_after(&value, TokenKind::Semicolon)?;
        Ok(self.builder.return_statement(location, value))
    }

    fn parse_statement_identifier(&mut self) -> Result<Statement> {
        match self.cursor.peek_nth(1).kind {
            TokenKind::Assign => self.parse_assignment(),
            TokenKind::Identifier => self.parse_declaration(),
            got => Err(ParseError::BadIdentifierStatement(got)),
        }
    }

    fn parse_assignment(&mut self) -> Result<Statement> {
        let name = self.cursor.expect_identifier()?;
        self.cursor.expect(TokenKind::Assign)?;
        let value = self.parse_value();
        self.expect_after(&value, TokenKind::Semicolon)?;
        Ok(self.builder.assign(name.location, name.lexeme, value))
    }

    fn parse_declaration(&mut self) -> Result<Statement> {
        let type_token = self.cursor.bump();
        let name = self.cursor.expect_identifier()?;
        let location = type_token.location;

        if self.cursor.bump_if(TokenKind::Semicolon) {
            return Ok(self.builder.declare(location, type_token.lexeme, name.lexeme));
        }
        if !self.cursor.bump_if(TokenKind::Assign) {
            return Err(ParseError::ExpectedButGot {
                expected: TokenKind::Semicolon,
                got: self.cursor.peek().kind,
            });
        }

        let value = self.parse_value();
        self.expect_after(&value, TokenKind::Semicolon)?;
        let statement = self
            .builder
            .declare_assign(location, type_token.lexeme, name.lexeme, value);
        Ok(statement)
    }

    fn parse_condition(&mut self) -> Result<Expression> {
        self.cursor.expect(TokenKind::OpenParanth)?;
        let condition = self.parse_value();
        self.expect_after(&condition, TokenKind::CloseParanth)?;
        Ok(condition)
    }

    fn parse_if(&mut self) -> Result<Statement> {
        let location = self.cursor.bump().location;
        let condition = self.parse_condition()?;
        let body = self.parse_block();
        let else_clause = self
            .cursor
            .peek_is(TokenKind::Else)
            .then(|| self.parse_else());

        Ok(self
            .builder
            .if_statement(location, condition, body, else_clause))
    }

    fn parse_else(&mut self) -> ElseClause {
        let location = self.cursor.bump().location;
        let condition = if self.cursor.peek_is(TokenKind::OpenParanth) {
            match self.parse_condition() {
                Ok(condition) => Some(condition),
                Err(err) => {
                    let at = self.cursor.location();
                    self.report(&err, at);
                    self.synchronize_tokens();
                    return self.builder.else_error(location);
                }
            }
        } else {
            None
        };
        let body = self.parse_block();

        self.builder.else_clause(location, condition, body)
    }

    fn parse_while(&mut self) -> Result<Statement> {
        let location = self.cursor.bump().location;
        let condition = self.parse_condition()?;
        let body = self.parse_block();
        Ok(self.builder.while_statement(location, condition, body))
    }

    /// Body of `if`/`else`/`while`: a scope, or an error node when `{` is missing.
    fn parse_block(&mut self) -> Block {
        let location = self.cursor.location();
        if self.cursor.peek_is(TokenKind::OpenCurly) {
            return self
                .parse_nested_scope()
                .map_or_else(|| self.builder.block_error(location), Block::Scope);
        }

        let err = ParseError::ExpectedButGot {
            expected: TokenKind::OpenCurly,
            got: self.cursor.peek().kind,
        };
        self.report(&err, location);
        self.synchronize_tokens();
        self.builder.block_error(location)
    }

    /// Expects the cursor at `{`. Past [MAX_NESTING] the whole scope is skipped and
    /// `None` returned.
    fn parse_nested_scope(&mut self) -> Option<Scope> {
        if self.depth >= MAX_NESTING {
            let at = self.cursor.location();
            self.report(&ParseError::NestingTooDeep(MAX_NESTING), at);
            self.skip_nested(TokenKind::OpenCurly, TokenKind::CloseCurly);
            return None;
        }

        self.depth += 1;
        let scope = self.parse_scope();
        self.depth -= 1;
        Some(scope)
    }

    /// Expects the cursor at `{`. A missing `}` is reported, the partial scope is kept.
    fn parse_scope(&mut self) -> Scope {
        let location = self.cursor.bump().location;
        let mut statements = Vec::new();

        loop {
            match self.cursor.peek().kind {
                TokenKind::CloseCurly => {
                    self.cursor.bump();
                    break;
                }
                TokenKind::Eof => {
                    let at = self.cursor.location();
                    self.report(&ParseError::UnclosedScope, at);
                    break;
                }
                TokenKind::Semicolon => {
                    self.cursor.bump();
                }
                _ => statements.push(self.parse_statement()),
            }
        }

        self.builder.scope(location, statements)
    }

    fn parse_struct(&mut self) -> Result<Statement> {
        let location = self.cursor.bump().location;
        let name = self.cursor.expect_identifier()?;
        self.cursor.expect(TokenKind::OpenCurly)?;

        // Duplicates surface when the analyzer defines the record.
        if let Err(err) = self.registry.declare_type(name.lexeme) {
            tracing::debug!(%err, "record name already registered");
        }

        let mut members = Vec::new();
        loop {
            match self.cursor.peek().kind {
                TokenKind::CloseCurly => {
                    self.cursor.bump();
                    break;
                }
                TokenKind::Eof => {
                    let at = self.cursor.location();
                    self.report(&ParseError::UnclosedScope, at);
                    break;
                }
                TokenKind::Semicolon => {
                    self.cursor.bump();
                }
                _ => members.push(self.parse_member()),
            }
        }

        Ok(self
            .builder
            .struct_statement(location, name.lexeme, members))
    }

    fn parse_member(&mut self) -> StructMember {
        let location = self.cursor.location();
        match self.parse_member_declaration() {
            Ok(declaration) => StructMember::Field(declaration),
            Err(err) => {
                let at = self.cursor.location();
                self.report(&err, at);
                self.skip_member();
                self.builder.member_error(location)
            }
        }
    }

    fn parse_member_declaration(&mut self) -> Result<Declaration> {
        let type_token = self.cursor.peek();
        if !type_token.kind.is_type_name() {
            return Err(ParseError::ExpectedTypeButGot(type_token.kind));
        }
        self.cursor.bump();
        let name = self.cursor.expect_identifier()?;
        self.cursor.expect(TokenKind::Semicolon)?;

        Ok(self
            .builder
            .declaration(type_token.location, type_token.lexeme, name.lexeme))
    }

    /// Like [synchronize_tokens](Self::synchronize_tokens), but never leaves the record body.
    fn skip_member(&mut self) {
        loop {
            match self.cursor.peek().kind {
                TokenKind::Eof | TokenKind::CloseCurly => break,
                TokenKind::Semicolon => {
                    self.cursor.bump();
                    break;
                }
                _ => {
                    self.cursor.bump();
                }
            }
        }
    }

    /// Skips from the opening token at the cursor past its matching `close`, or to end
    /// of input.
    fn skip_nested(&mut self, open: TokenKind, close: TokenKind) {
        let mut open_count = 0usize;
        loop {
            let kind = self.cursor.bump().kind;
            if kind == open {
                open_count += 1;
            } else if kind == close {
                open_count -= 1;
                if open_count == 0 {
                    break;
                }
            } else if kind == TokenKind::Eof {
                break;
            }
        }
    }

    /// Skips a run of `!` and the primary behind it.
    fn skip_negated_factor(&mut self) {
        while self.cursor.bump_if(TokenKind::LogicalNot) {}
        match self.cursor.peek().kind {
            TokenKind::OpenParanth => {
                self.skip_nested(TokenKind::OpenParanth, TokenKind::CloseParanth);
            }
            TokenKind::Identifier | TokenKind::Constant | TokenKind::True | TokenKind::False => {
                self.cursor.bump();
            }
            _ => {}
        }
    }

    /// A whole expression: statement value or condition.
    fn parse_value(&mut self) -> Expression {
        self.operators = 0;
        self.parse_expression(0)
    }

    /// Left-associative precedence climbing; the right operand binds tighter than `prec`.
    fn parse_expression(&mut self, min_prec: u8) -> Expression {
        let mut lhs = self.parse_factor();
        if lhs.is_error() {
            return lhs;
        }

        while let Ok(op) = Operator::try_from(self.cursor.peek().kind) {
            let prec = get_prec(op);
            if prec < min_prec {
                break;
            }
            self.operators += 1;
            if self.operators > MAX_OPERATORS {
                let at = self.cursor.location();
                if self.operators == MAX_OPERATORS + 1 {
                    self.report(&ParseError::ExpressionTooLong(MAX_OPERATORS), at);
                }
                return self.builder.expression_error(at);
            }
            self.cursor.bump();
            let rhs = self.parse_expression(prec + 1);
            lhs = self.builder.binary(op, lhs, rhs);
        }

        lhs
    }

    /// A malformed factor is reported once and left unconsumed; the enclosing
    /// statement decides how to recover.
    fn parse_factor(&mut self) -> Expression {
        let token = self.cursor.peek();
        let location = token.location;

        match token.kind {
            TokenKind::Identifier => {
                self.cursor.bump();
                self.builder.identifier(location, token.lexeme)
            }
            TokenKind::Constant => {
                self.cursor.bump();
                if let Ok(value) = token.lexeme.parse::<i32>() {
                    self.builder.integer(location, value)
                } else {
                    let err = ParseError::ConstantOutOfRange(token.lexeme.to_owned());
                    self.report(&err, location);
                    self.builder.expression_error(location)
                }
            }
            TokenKind::True => {
                self.cursor.bump();
                self.builder.boolean(location, true)
            }
            TokenKind::False => {
                self.cursor.bump();
                self.builder.boolean(location, false)
            }
            TokenKind::LogicalNot | TokenKind::OpenParanth if self.depth >= MAX_NESTING => {
                self.report(&ParseError::NestingTooDeep(MAX_NESTING), location);
                self.skip_negated_factor();
                self.builder.expression_error(location)
            }
            TokenKind::LogicalNot => {
                self.cursor.bump();
                self.depth += 1;
                let operand = self.parse_factor();
                self.depth -= 1;
                self.builder.not(location, operand)
            }
            TokenKind::OpenParanth => {
                self.depth += 1;
                let exp = self.parse_factor_subexp();
                self.depth -= 1;
                exp
            }
            kind => {
                self.report(&ParseError::BadFactor(kind), location);
                self.builder.expression_error(location)
            }
        }
    }

    fn parse_factor_subexp(&mut self) -> Expression {
        let location = self.cursor.bump().location;
        let exp = self.parse_expression(0);

        match self.cursor.expect(TokenKind::CloseParanth) {
            Ok(_) => exp,
            Err(err) => {
                if !exp.is_error() {
                    let at = self.cursor.location();
                    self.report(&err, at);
                }
                self.builder.expression_error(location)
            }
        }
    }
}

/// Parses a whole token stream. Never fails; problems end up in `reporter`.
pub fn parse(
    tokens: &[Token],
    reporter: &mut ErrorReporter,
    registry: &mut TypeRegistry,
    options: ParserOptions,
) -> Program {
    Parser::new(tokens, reporter, registry, options).parse()
}
