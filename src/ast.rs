//! Syntax tree produced by the parser and annotated in place by semantic analysis.
//!
//! Every syntactic category is a closed enum with its own error variant, so a subtree that
//! failed to parse is still a well-formed node. Nodes are constructed through
//! [AstBuilder](builder::AstBuilder) only.

pub mod builder;

use crate::location::SourceLocation;
use crate::types::TypeId;
use std::fmt;

pub use builder::AstBuilder;

pub type Identifier = String;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub location: SourceLocation,
    /// [TypeId::UNDEFINED] until semantic analysis visits the node
    pub ty: TypeId,
    pub kind: ExpressionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionKind {
    Identifier(Identifier),
    Integer(i32),
    Boolean(bool),
    /// Unary `!` is a binary node with [Operator::Not] and an [ExpressionKind::Error] rhs.
    Binary {
        op: Operator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Error,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Multiply,
    Div,
    Mod,
    Add,
    Subtract,
    ShiftLeft,
    ShiftRight,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    IsEqual,
    IsNotEqual,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,
    Not,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Break(SourceLocation),
    Continue(SourceLocation),
    Return {
        location: SourceLocation,
        value: Expression,
    },
    Declare(Declaration),
    DeclareAssign {
        declaration: Declaration,
        value: Expression,
    },
    Assign {
        location: SourceLocation,
        name: Identifier,
        value: Expression,
    },
    If {
        location: SourceLocation,
        condition: Expression,
        body: Block,
        else_clause: Option<ElseClause>,
    },
    While {
        location: SourceLocation,
        condition: Expression,
        body: Block,
    },
    Scope(Scope),
    Struct {
        location: SourceLocation,
        name: Identifier,
        members: Vec<StructMember>,
    },
    Error(SourceLocation),
}

/// `type name`, shared by bare declarations, declare+assign and struct members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub location: SourceLocation,
    pub type_name: Identifier,
    pub name: Identifier,
    /// Resolved by semantic analysis; stays undefined on redeclaration
    pub ty: TypeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub location: SourceLocation,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Scope(Scope),
    Error(SourceLocation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Else {
    pub location: SourceLocation,
    pub condition: Option<Expression>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElseClause {
    Else(Else),
    Error(SourceLocation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructMember {
    Field(Declaration),
    Error(SourceLocation),
}

impl Operator {
    /// Operators whose operand chains may be flattened and folded.
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Multiply
                | Self::BitwiseAnd
                | Self::BitwiseOr
                | Self::BitwiseXor
                | Self::LogicalAnd
                | Self::LogicalOr
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Multiply => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
            Self::IsEqual => "==",
            Self::IsNotEqual => "!=",
            Self::BitwiseAnd => "&",
            Self::BitwiseXor => "^",
            Self::BitwiseOr => "|",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::Not => "!",
        };
        write!(f, "{s}")
    }
}

impl Expression {
    pub fn is_error(&self) -> bool {
        matches!(self.kind, ExpressionKind::Error)
    }

    /// True when an error node occurs anywhere in the tree. The placeholder operand of
    /// `!` does not count.
    pub fn contains_error(&self) -> bool {
        match &self.kind {
            ExpressionKind::Error => true,
            ExpressionKind::Binary {
                op: Operator::Not,
                lhs,
                ..
            } => lhs.contains_error(),
            ExpressionKind::Binary { lhs, rhs, .. } => {
                lhs.contains_error() || rhs.contains_error()
            }
            _ => false,
        }
    }

    pub fn get_boolean(&self) -> Option<bool> {
        match self.kind {
            ExpressionKind::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::Break(location)
            | Self::Continue(location)
            | Self::Error(location)
            | Self::Return { location, .. }
            | Self::Assign { location, .. }
            | Self::If { location, .. }
            | Self::While { location, .. }
            | Self::Struct { location, .. } => *location,
            Self::Declare(declaration) | Self::DeclareAssign { declaration, .. } => {
                declaration.location
            }
            Self::Scope(scope) => scope.location,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
