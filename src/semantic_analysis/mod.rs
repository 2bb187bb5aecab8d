//! Single forward pass annotating every expression with its type.
//!
//! The pass never fails. Problems are reported and the offending node keeps the
//! `undefined` type, which suppresses follow-up diagnostics that depend on it.

mod operator_matrix;
mod semanalysis_error;
#[cfg(test)]
mod semanalysis_tests;
mod variables;

use crate::ast::*;
use crate::diagnostics::ErrorReporter;
use crate::location::SourceLocation;
use crate::types::{TypeError, TypeId, TypeRegistry};

pub use operator_matrix::OperatorMatrix;
pub use semanalysis_error::SemAnalysisError;
pub use variables::{Variable, VariableTable};

pub struct SemanticAnalyzer<'a> {
    reporter: &'a mut ErrorReporter,
    registry: &'a mut TypeRegistry,
    matrix: OperatorMatrix,
    variables: VariableTable,
    loop_depth: u32,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(reporter: &'a mut ErrorReporter, registry: &'a mut TypeRegistry) -> Self {
        Self {
            reporter,
            registry,
            matrix: OperatorMatrix::new(),
            variables: VariableTable::new(),
            loop_depth: 0,
        }
    }

    pub fn analyze(&mut self, mut program: Program) -> Program {
        for statement in &mut program.statements {
            self.check_statement(statement);
        }
        tracing::debug!(variables = self.variables.len(), "analyzed program");
        program
    }

    /// Infers the type of `exp` without touching its `ty` slots.
    pub fn type_of(&self, exp: &Expression) -> TypeId {
        self.infer(&exp.kind, |operand| self.type_of(operand))
    }

    /// Type of a node given the types of its operands.
    fn infer(&self, kind: &ExpressionKind, operand_ty: impl Fn(&Expression) -> TypeId) -> TypeId {
        match kind {
            ExpressionKind::Integer(_) => TypeId::INT,
            ExpressionKind::Boolean(_) => TypeId::BOOL,
            ExpressionKind::Identifier(name) => self.variables.type_of(name),
            ExpressionKind::Binary {
                op: op @ Operator::Not,
                lhs,
                ..
            } => self.matrix.lookup_unary(*op, operand_ty(lhs)),
            ExpressionKind::Binary { op, lhs, rhs } => {
                self.matrix.lookup(operand_ty(lhs), *op, operand_ty(rhs))
            }
            ExpressionKind::Error => TypeId::UNDEFINED,
        }
    }

    fn report(&mut self, err: &SemAnalysisError, location: SourceLocation) {
        self.reporter.report(err, location);
    }

    fn type_name(&self, ty: TypeId) -> String {
        self.registry.name_of(ty).to_owned()
    }

    fn check_statement(&mut self, statement: &mut Statement) {
        match statement {
            Statement::Break(location) => {
                if self.loop_depth == 0 {
                    self.report(&SemAnalysisError::BreakOutsideOfLoop, *location);
                }
            }
            Statement::Continue(location) => {
                if self.loop_depth == 0 {
                    self.report(&SemAnalysisError::ContinueOutsideOfLoop, *location);
                }
            }
            Statement::Return { location, value } => {
                let ty = self.check_expression(value);
                if ty.is_defined() && ty != TypeId::INT {
                    let err = SemAnalysisError::ReturnNotInt(self.type_name(ty));
                    self.report(&err, *location);
                }
            }
            Statement::Declare(declaration) => {
                self.check_declaration(declaration);
            }
            Statement::DeclareAssign { declaration, value } => {
                self.check_declare_assign(declaration, value);
            }
            Statement::Assign {
                location,
                name,
                value,
            } => self.check_assign(*location, name, value),
            Statement::If {
                condition,
                body,
                else_clause,
                ..
            } => {
                self.check_condition("if", condition);
                self.check_block(body);
                if let Some(else_clause) = else_clause {
                    self.check_else(else_clause);
                }
            }
            Statement::While {
                condition, body, ..
            } => {
                self.check_condition("while", condition);
                self.loop_depth += 1;
                self.check_block(body);
                self.loop_depth -= 1;
            }
            Statement::Scope(scope) => self.check_scope(scope),
            Statement::Struct {
                location,
                name,
                members,
            } => self.check_struct(*location, name, members),
            Statement::Error(location) => {
                self.report(&SemAnalysisError::InvalidStatement, *location);
            }
        }
    }

    /// Resolves the declared type and enters the variable. Returns the resolved type,
    /// even when the name was already taken.
    fn check_declaration(&mut self, declaration: &mut Declaration) -> TypeId {
        let ty = self.registry.find_type(&declaration.type_name);
        if ty.is_undefined() {
            let err = SemAnalysisError::UnknownType(declaration.type_name.clone());
            self.report(&err, declaration.location);
        }

        if self.variables.declare(&declaration.name, ty) {
            declaration.ty = ty;
        } else {
            let err = SemAnalysisError::IdentifierRedeclaration(declaration.name.clone());
            self.report(&err, declaration.location);
        }
        ty
    }

    fn check_declare_assign(&mut self, declaration: &mut Declaration, value: &mut Expression) {
        // The initializer cannot see the variable it initializes.
        let value_ty = self.check_expression(value);
        let declared = self.check_declaration(declaration);

        if value_ty.is_defined() && declared.is_defined() && value_ty != declared {
            let err = SemAnalysisError::DeclarationMismatch {
                name: declaration.name.clone(),
                expected: self.type_name(declared),
                found: self.type_name(value_ty),
            };
            self.report(&err, value.location);
        }
    }

    fn check_assign(&mut self, location: SourceLocation, name: &str, value: &mut Expression) {
        let value_ty = self.check_expression(value);
        let Some(variable_ty) = self.variables.lookup(name).map(|v| v.ty) else {
            let err = SemAnalysisError::VariableNotDeclared(name.to_owned());
            self.report(&err, location);
            return;
        };

        if value_ty.is_defined() && variable_ty.is_defined() && value_ty != variable_ty {
            let err = SemAnalysisError::AssignmentMismatch {
                name: name.to_owned(),
                expected: self.type_name(variable_ty),
                found: self.type_name(value_ty),
            };
            self.report(&err, value.location);
        }
    }

    fn check_condition(&mut self, construct: &'static str, condition: &mut Expression) {
        let ty = self.check_expression(condition);
        if ty.is_defined() && ty != TypeId::BOOL {
            let err = SemAnalysisError::ConditionNotBool {
                construct,
                found: self.type_name(ty),
            };
            self.report(&err, condition.location);
        }
    }

    fn check_block(&mut self, block: &mut Block) {
        match block {
            Block::Scope(scope) => self.check_scope(scope),
            Block::Error(location) => self.report(&SemAnalysisError::InvalidScope, *location),
        }
    }

    fn check_else(&mut self, else_clause: &mut ElseClause) {
        match else_clause {
            ElseClause::Else(els) => {
                if let Some(condition) = &mut els.condition {
                    self.check_condition("else if", condition);
                }
                self.check_block(&mut els.body);
            }
            ElseClause::Error(location) => {
                self.report(&SemAnalysisError::InvalidElse, *location);
            }
        }
    }

    fn check_scope(&mut self, scope: &mut Scope) {
        for statement in &mut scope.statements {
            self.check_statement(statement);
        }
    }

    fn check_struct(&mut self, location: SourceLocation, name: &str, members: &mut [StructMember]) {
        let mut fields: Vec<(Identifier, TypeId)> = Vec::new();

        for member in members {
            let declaration = match member {
                StructMember::Field(declaration) => declaration,
                StructMember::Error(location) => {
                    self.report(&SemAnalysisError::InvalidMember, *location);
                    continue;
                }
            };

            let ty = self.registry.find_type(&declaration.type_name);
            if ty.is_undefined() {
                let err = SemAnalysisError::UnknownMemberType {
                    member: declaration.name.clone(),
                    ty: declaration.type_name.clone(),
                };
                self.report(&err, declaration.location);
                continue;
            }
            if fields.iter().any(|(field, _)| *field == declaration.name) {
                let err = SemAnalysisError::DuplicateMember {
                    record: name.to_owned(),
                    member: declaration.name.clone(),
                };
                self.report(&err, declaration.location);
                continue;
            }

            declaration.ty = ty;
            fields.push((declaration.name.clone(), ty));
        }

        if let Err(err) = self.registry.define_type(name, fields) {
            debug_assert!(
                !matches!(err, TypeError::NotDeclared(_)),
                "record `{name}` reached analysis without being declared"
            );
            self.reporter.report(&err, location);
        }
    }

    /// Annotates `exp` and, when its type stays undefined, reports the causes once.
    fn check_expression(&mut self, exp: &mut Expression) -> TypeId {
        self.annotate(exp);
        if exp.ty.is_undefined() {
            self.explain_undefined(exp);
        }
        exp.ty
    }

    fn annotate(&self, exp: &mut Expression) {
        match &mut exp.kind {
            ExpressionKind::Binary {
                op: Operator::Not,
                lhs,
                ..
            } => self.annotate(lhs),
            ExpressionKind::Binary { lhs, rhs, .. } => {
                self.annotate(lhs);
                self.annotate(rhs);
            }
            _ => {}
        }
        exp.ty = self.infer(&exp.kind, |operand| operand.ty);
    }

    /// Walks an undefined-typed tree and reports every root cause: unknown variables,
    /// error nodes, and operators applied to defined but unsupported operand types.
    fn explain_undefined(&mut self, exp: &Expression) {
        match &exp.kind {
            ExpressionKind::Integer(_) | ExpressionKind::Boolean(_) => {}
            ExpressionKind::Identifier(name) => {
                if self.variables.lookup(name).is_none() {
                    let err = SemAnalysisError::VariableNotDeclared(name.clone());
                    self.report(&err, exp.location);
                }
            }
            ExpressionKind::Error => {
                self.report(&SemAnalysisError::InvalidExpression, exp.location);
            }
            ExpressionKind::Binary {
                op: op @ Operator::Not,
                lhs,
                ..
            } => {
                if lhs.ty.is_undefined() {
                    self.explain_undefined(lhs);
                } else {
                    let err = SemAnalysisError::UndefinedUnaryOperator {
                        op: *op,
                        operand: self.type_name(lhs.ty),
                    };
                    self.report(&err, exp.location);
                }
            }
            ExpressionKind::Binary { op, lhs, rhs } => {
                if lhs.ty.is_undefined() {
                    self.explain_undefined(lhs);
                }
                if rhs.ty.is_undefined() {
                    self.explain_undefined(rhs);
                }
                if lhs.ty.is_defined() && rhs.ty.is_defined() {
                    let err = SemAnalysisError::UndefinedOperator {
                        op: *op,
                        lhs: self.type_name(lhs.ty),
                        rhs: self.type_name(rhs.ty),
                    };
                    self.report(&err, exp.location);
                }
            }
        }
    }
}

/// Runs semantic analysis over `program`, returning it with every expression annotated.
pub fn analyze(
    program: Program,
    reporter: &mut ErrorReporter,
    registry: &mut TypeRegistry,
) -> Program {
    SemanticAnalyzer::new(reporter, registry).analyze(program)
}
