use crate::diagnostics::{ErrorKind, Reportable};
use crate::lexer::TokenKind;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected `{expected}`, but got `{got}`")]
    ExpectedButGot { expected: TokenKind, got: TokenKind },
    #[error("expected identifier, but got `{0}`")]
    ExpectedIdentifierButGot(TokenKind),
    #[error("expected type name, but got `{0}`")]
    ExpectedTypeButGot(TokenKind),
    #[error("expected `=` or a variable name after identifier, but got `{0}`")]
    BadIdentifierStatement(TokenKind),
    #[error("invalid expression starting at `{0}`")]
    BadFactor(TokenKind),
    #[error("integer literal {0} does not fit into int")]
    ConstantOutOfRange(String),
    #[error("missing `}}` at end of scope")]
    UnclosedScope,
    #[error("no statement was found starting at `{0}`")]
    NoStatementFound(TokenKind),
    #[error("nesting is deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("expression has more than {0} operators")]
    ExpressionTooLong(usize),
    /// The statement already carries a reported error; never shown to the user.
    #[error("statement abandoned after a malformed expression")]
    AbandonedStatement,
}

impl Reportable for ParseError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NoStatementFound(_) => ErrorKind::Unknown,
            _ => ErrorKind::Syntax,
        }
    }
}
