use crate::location::SourceLocation;
use std::fmt;

/// Token borrowing its lexeme from the source buffer.
///
/// The `'src` lifetime ties every token to the text it was cut from, so a token
/// stream can never outlive its source.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub location: SourceLocation,
}

impl<'src> Token<'src> {
    pub const fn new(kind: TokenKind, lexeme: &'src str, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme,
            location,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Basic token type
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// any non-keyword word (variable names, user type names, ..)
    Identifier,
    /// decimal integer literal
    Constant,
    /// true keyword
    True,
    /// false keyword
    False,
    /// int keyword
    Int,
    /// bool keyword
    Bool,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// for keyword
    For,
    /// return keyword
    Return,
    /// break keyword
    Break,
    /// continue keyword
    Continue,
    /// struct keyword
    Struct,
    /// (
    OpenParanth,
    /// )
    CloseParanth,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// +
    Plus,
    /// -
    Hyphen,
    /// *
    Asterisk,
    /// /
    FSlash,
    /// %
    Percent,
    /// =
    Assign,
    /// !
    LogicalNot,
    /// &&
    LogicalAnd,
    /// ||
    LogicalOr,
    /// ==
    IsEqual,
    /// !=
    IsNotEqual,
    /// <
    IsLessThan,
    /// >
    IsGreaterThan,
    /// <=
    IsLessThanOrEqual,
    /// >=
    IsGreaterThanOrEqual,
    /// &
    BitwiseAnd,
    /// |
    BitwiseOr,
    /// ^
    BitwiseXor,
    /// <<
    ShiftLeft,
    /// >>
    ShiftRight,
    /// character the lexer could not place
    Error,
    /// end of input
    Eof,
}

impl TokenKind {
    #[inline]
    pub fn is_builtin_type(self) -> bool {
        matches!(self, Self::Int | Self::Bool)
    }

    /// Tokens that can name a type in a declaration.
    #[inline]
    pub fn is_type_name(self) -> bool {
        self.is_builtin_type() || self == Self::Identifier
    }

    /// Keywords error recovery stops in front of.
    #[inline]
    pub fn starts_statement(self) -> bool {
        matches!(self, Self::If | Self::While | Self::Return | Self::Struct)
    }

    #[inline]
    pub fn ends_statement(self) -> bool {
        matches!(self, Self::Semicolon | Self::CloseCurly)
    }
}

impl TryFrom<char> for TokenKind {
    type Error = char;
    fn try_from(c: char) -> Result<Self, char> {
        match c {
            ';' => Ok(Self::Semicolon),
            ',' => Ok(Self::Comma),
            '(' => Ok(Self::OpenParanth),
            ')' => Ok(Self::CloseParanth),
            '{' => Ok(Self::OpenCurly),
            '}' => Ok(Self::CloseCurly),
            '+' => Ok(Self::Plus),
            '-' => Ok(Self::Hyphen),
            '*' => Ok(Self::Asterisk),
            '/' => Ok(Self::FSlash),
            '%' => Ok(Self::Percent),
            '^' => Ok(Self::BitwiseXor),
            '=' => Ok(Self::Assign),
            '!' => Ok(Self::LogicalNot),
            '<' => Ok(Self::IsLessThan),
            '>' => Ok(Self::IsGreaterThan),
            '&' => Ok(Self::BitwiseAnd),
            '|' => Ok(Self::BitwiseOr),
            _ => Err(c),
        }
    }
}

impl From<&str> for TokenKind {
    fn from(s: &str) -> Self {
        match s {
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "for" => Self::For,
            "return" => Self::Return,
            "break" => Self::Break,
            "continue" => Self::Continue,
            "int" => Self::Int,
            "bool" => Self::Bool,
            "true" => Self::True,
            "false" => Self::False,
            "struct" => Self::Struct,
            _ => Self::Identifier,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Identifier => "identifier",
            Self::Constant => "integer literal",
            Self::True => "true",
            Self::False => "false",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Return => "return",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Struct => "struct",
            Self::OpenParanth => "(",
            Self::CloseParanth => ")",
            Self::OpenCurly => "{",
            Self::CloseCurly => "}",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Plus => "+",
            Self::Hyphen => "-",
            Self::Asterisk => "*",
            Self::FSlash => "/",
            Self::Percent => "%",
            Self::Assign => "=",
            Self::LogicalNot => "!",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::IsEqual => "==",
            Self::IsNotEqual => "!=",
            Self::IsLessThan => "<",
            Self::IsGreaterThan => ">",
            Self::IsLessThanOrEqual => "<=",
            Self::IsGreaterThanOrEqual => ">=",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Error => "invalid character",
            Self::Eof => "end of input",
        };
        write!(f, "{s}")
    }
}
