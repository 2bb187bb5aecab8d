use crate::ast::{Identifier, Operator};
use crate::diagnostics::{ErrorKind, Reportable};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SemAnalysisError {
    #[error("undefined type `{0}` in declaration")]
    UnknownType(Identifier),
    #[error("variable `{0}` has already been defined")]
    IdentifierRedeclaration(Identifier),
    #[error("unknown variable: {0}")]
    VariableNotDeclared(Identifier),
    #[error("operator `{op}` is not defined for `{lhs}` and `{rhs}`")]
    UndefinedOperator {
        op: Operator,
        lhs: String,
        rhs: String,
    },
    #[error("operator `{op}` is not defined for `{operand}`")]
    UndefinedUnaryOperator { op: Operator, operand: String },
    #[error("type mismatch in declaration of `{name}`: expected `{expected}`, found `{found}`")]
    DeclarationMismatch {
        name: Identifier,
        expected: String,
        found: String,
    },
    #[error("type mismatch in assignment to `{name}`: expected `{expected}`, found `{found}`")]
    AssignmentMismatch {
        name: Identifier,
        expected: String,
        found: String,
    },
    #[error("{construct} condition must be of type `bool`, found `{found}`")]
    ConditionNotBool {
        construct: &'static str,
        found: String,
    },
    #[error("break not within loop")]
    BreakOutsideOfLoop,
    #[error("continue not within loop")]
    ContinueOutsideOfLoop,
    #[error("return type mismatch, expected `int`, found `{0}`")]
    ReturnNotInt(String),
    #[error("undefined type `{ty}` for member `{member}`")]
    UnknownMemberType { member: Identifier, ty: Identifier },
    #[error("duplicate member `{member}` in `{record}`")]
    DuplicateMember {
        record: Identifier,
        member: Identifier,
    },
    #[error("failed parsing statement")]
    InvalidStatement,
    #[error("failed parsing expression")]
    InvalidExpression,
    #[error("failed parsing scope")]
    InvalidScope,
    #[error("failed parsing else clause")]
    InvalidElse,
    #[error("failed parsing struct member")]
    InvalidMember,
}

impl Reportable for SemAnalysisError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidStatement
            | Self::InvalidExpression
            | Self::InvalidScope
            | Self::InvalidElse
            | Self::InvalidMember => ErrorKind::Syntax,
            _ => ErrorKind::Semantic,
        }
    }
}
