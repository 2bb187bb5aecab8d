use super::*;

/// Single construction surface for AST nodes.
///
/// Keeps location tagging and the initial `undefined` type slot in one place.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstBuilder;

impl AstBuilder {
    pub fn new() -> Self {
        Self
    }

    fn expression(self, location: SourceLocation, kind: ExpressionKind) -> Expression {
        Expression {
            location,
            ty: TypeId::UNDEFINED,
            kind,
        }
    }

    pub fn identifier(self, location: SourceLocation, name: impl Into<Identifier>) -> Expression {
        self.expression(location, ExpressionKind::Identifier(name.into()))
    }

    pub fn integer(self, location: SourceLocation, value: i32) -> Expression {
        self.expression(location, ExpressionKind::Integer(value))
    }

    pub fn boolean(self, location: SourceLocation, value: bool) -> Expression {
        self.expression(location, ExpressionKind::Boolean(value))
    }

    /// The node takes the location of its left operand.
    pub fn binary(self, op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        let location = lhs.location;
        let kind = ExpressionKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
        self.expression(location, kind)
    }

    pub fn not(self, location: SourceLocation, operand: Expression) -> Expression {
        let placeholder = self.expression_error(location);
        let kind = ExpressionKind::Binary {
            op: Operator::Not,
            lhs: Box::new(operand),
            rhs: Box::new(placeholder),
        };
        self.expression(location, kind)
    }

    pub fn expression_error(self, location: SourceLocation) -> Expression {
        self.expression(location, ExpressionKind::Error)
    }

    pub fn break_statement(self, location: SourceLocation) -> Statement {
        Statement::Break(location)
    }

    pub fn continue_statement(self, location: SourceLocation) -> Statement {
        Statement::Continue(location)
    }

    pub fn return_statement(self, location: SourceLocation, value: Expression) -> Statement {
        Statement::Return { location, value }
    }

    pub fn declaration(
        self,
        location: SourceLocation,
        type_name: impl Into<Identifier>,
        name: impl Into<Identifier>,
    ) -> Declaration {
        Declaration {
            location,
            type_name: type_name.into(),
            name: name.into(),
            ty: TypeId::UNDEFINED,
        }
    }

    pub fn declare(
        self,
        location: SourceLocation,
        type_name: impl Into<Identifier>,
        name: impl Into<Identifier>,
    ) -> Statement {
        Statement::Declare(self.declaration(location, type_name, name))
    }

    pub fn declare_assign(
        self,
        location: SourceLocation,
        type_name: impl Into<Identifier>,
        name: impl Into<Identifier>,
        value: Expression,
    ) -> Statement {
        let declaration = self.declaration(location, type_name, name);
        Statement::DeclareAssign { declaration, value }
    }

    pub fn assign(
        self,
        location: SourceLocation,
        name: impl Into<Identifier>,
        value: Expression,
    ) -> Statement {
        Statement::Assign {
            location,
            name: name.into(),
            value,
        }
    }

    pub fn if_statement(
        self,
        location: SourceLocation,
        condition: Expression,
        body: Block,
        else_clause: Option<ElseClause>,
    ) -> Statement {
        Statement::If {
            location,
            condition,
            body,
            else_clause,
        }
    }

    pub fn else_clause(
        self,
        location: SourceLocation,
        condition: Option<Expression>,
        body: Block,
    ) -> ElseClause {
        ElseClause::Else(Else {
            location,
            condition,
            body,
        })
    }

    pub fn else_error(self, location: SourceLocation) -> ElseClause {
        ElseClause::Error(location)
    }

    pub fn while_statement(
        self,
        location: SourceLocation,
        condition: Expression,
        body: Block,
    ) -> Statement {
        Statement::While {
            location,
            condition,
            body,
        }
    }

    pub fn scope(self, location: SourceLocation, statements: Vec<Statement>) -> Scope {
        Scope {
            location,
            statements,
        }
    }

    pub fn block_error(self, location: SourceLocation) -> Block {
        Block::Error(location)
    }

    pub fn struct_statement(
        self,
        location: SourceLocation,
        name: impl Into<Identifier>,
        members: Vec<StructMember>,
    ) -> Statement {
        Statement::Struct {
            location,
            name: name.into(),
            members,
        }
    }

    pub fn member_error(self, location: SourceLocation) -> StructMember {
        StructMember::Error(location)
    }

    pub fn statement_error(self, location: SourceLocation) -> Statement {
        Statement::Error(location)
    }

    pub fn program(self, statements: Vec<Statement>) -> Program {
        Program { statements }
    }
}
