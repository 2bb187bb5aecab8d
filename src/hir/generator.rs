use super::{
    flatten, fold, HirFactor, HirInstruction, HirProgram, Label, VirtualRegister, RETURN_SLOT,
};
use crate::ast::*;
use crate::types::TypeRegistry;

struct LoopLabels {
    continue_label: Label,
    break_label: Label,
}

/// Lowering pass state. Register numbering starts at zero for every generator; label 0
/// is reserved for the exit label.
pub struct HirGenerator<'a> {
    registry: &'a TypeRegistry,
    instructions: Vec<HirInstruction>,
    exit_label: Label,
    register_count: u32,
    label_count: u32,
    loops: Vec<LoopLabels>,
}

impl<'a> HirGenerator<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            instructions: Vec::new(),
            exit_label: Label::new(0),
            register_count: 0,
            label_count: 1,
            loops: Vec::new(),
        }
    }

    fn new_register(&mut self) -> VirtualRegister {
        let register = VirtualRegister::new(self.register_count);
        self.register_count += 1;
        register
    }

    fn new_label(&mut self) -> Label {
        let label = Label::new(self.label_count);
        self.label_count += 1;
        label
    }

    fn emit(&mut self, instruction: HirInstruction) {
        self.instructions.push(instruction);
    }

    pub fn lower_program(mut self, program: Program) -> HirProgram {
        for statement in program.statements {
            self.lower_statement(statement);
        }
        self.emit(HirInstruction::Label(self.exit_label));

        tracing::debug!(
            instructions = self.instructions.len(),
            registers = self.register_count,
            labels = self.label_count,
            "lowered program"
        );
        HirProgram {
            instructions: self.instructions,
            exit_label: self.exit_label,
        }
    }

    pub fn lower_statement(&mut self, statement: Statement) {
        match statement {
            Statement::Break(location) => match self.loops.last() {
                Some(labels) => self.emit(HirInstruction::Jump(labels.break_label)),
                None => tracing::warn!(%location, "break outside of loop skipped"),
            },
            Statement::Continue(location) => match self.loops.last() {
                Some(labels) => self.emit(HirInstruction::Jump(labels.continue_label)),
                None => tracing::warn!(%location, "continue outside of loop skipped"),
            },
            Statement::Return { value, .. } => {
                let src = self.lower_expression(value);
                self.emit(HirInstruction::Store {
                    variable: RETURN_SLOT.to_owned(),
                    src,
                });
                self.emit(HirInstruction::Jump(self.exit_label));
            }
            Statement::Assign { name, value, .. } => {
                let src = self.lower_expression(value);
                self.emit(HirInstruction::Store {
                    variable: name,
                    src,
                });
            }
            Statement::DeclareAssign { declaration, value } => {
                let src = self.lower_expression(value);
                self.emit(HirInstruction::Store {
                    variable: declaration.name,
                    src,
                });
            }
            Statement::If {
                condition,
                body,
                else_clause,
                ..
            } => self.lower_if(condition, body, else_clause),
            Statement::While {
                condition, body, ..
            } => self.lower_while(condition, body),
            Statement::Scope(scope) => self.lower_scope(scope),
            Statement::Declare(_) | Statement::Struct { .. } | Statement::Error(_) => {}
        }
    }

    fn lower_scope(&mut self, scope: Scope) {
        for statement in scope.statements {
            self.lower_statement(statement);
        }
    }

    fn lower_block(&mut self, block: Block) {
        if let Block::Scope(scope) = block {
            self.lower_scope(scope);
        }
    }

    fn lower_if(
        &mut self,
        condition: Expression,
        body: Block,
        else_clause: Option<ElseClause>,
    ) {
        let then_label = self.new_label();
        let else_label = else_clause.as_ref().map(|_| self.new_label());
        let end_label = self.new_label();

        self.lower_branch(condition, then_label, else_label.unwrap_or(end_label));
        self.emit(HirInstruction::Label(then_label));
        self.lower_block(body);

        if let (Some(else_label), Some(else_clause)) = (else_label, else_clause) {
            self.emit(HirInstruction::Jump(end_label));
            self.emit(HirInstruction::Label(else_label));
            if let ElseClause::Else(els) = else_clause {
                if let Some(condition) = els.condition {
                    let body_label = self.new_label();
                    self.lower_branch(condition, body_label, end_label);
                    self.emit(HirInstruction::Label(body_label));
                }
                self.lower_block(els.body);
            }
        }
        self.emit(HirInstruction::Label(end_label));
    }

    fn lower_while(&mut self, condition: Expression, body: Block) {
        let start_label = self.new_label();
        let body_label = self.new_label();
        let end_label = self.new_label();

        self.emit(HirInstruction::Label(start_label));
        self.lower_branch(condition, body_label, end_label);
        self.emit(HirInstruction::Label(body_label));

        self.loops.push(LoopLabels {
            continue_label: start_label,
            break_label: end_label,
        });
        self.lower_block(body);
        self.loops.pop();

        self.emit(HirInstruction::Jump(start_label));
        self.emit(HirInstruction::Label(end_label));
    }

    /// Jumps to `on_true` or `on_false` depending on `condition`, evaluating `&&` and `||`
    /// operands only as far as needed.
    pub fn lower_branch(&mut self, condition: Expression, on_true: Label, on_false: Label) {
        if !self.is_lowerable(&condition) {
            tracing::warn!(location = %condition.location, "malformed condition taken as false");
            self.emit(HirInstruction::Jump(on_false));
            return;
        }

        match condition.kind {
            ExpressionKind::Boolean(value) => {
                let target = if value { on_true } else { on_false };
                self.emit(HirInstruction::Jump(target));
            }
            ExpressionKind::Binary {
                op: Operator::Not,
                lhs,
                ..
            } => self.lower_branch(*lhs, on_false, on_true),
            ExpressionKind::Binary {
                op: op @ (Operator::LogicalAnd | Operator::LogicalOr),
                lhs,
                rhs,
            } => {
                let chain = Expression {
                    kind: ExpressionKind::Binary { op, lhs, rhs },
                    ..condition
                };
                let mut operands = fold(op, flatten(op, chain)).into_iter().peekable();
                while let Some(operand) = operands.next() {
                    if operands.peek().is_none() {
                        self.lower_branch(operand, on_true, on_false);
                        break;
                    }
                    let next = self.new_label();
                    if op == Operator::LogicalAnd {
                        self.lower_branch(operand, next, on_false);
                    } else {
                        self.lower_branch(operand, on_true, next);
                    }
                    self.emit(HirInstruction::Label(next));
                }
            }
            kind => {
                let condition = self.lower_expression(Expression { kind, ..condition });
                self.emit(HirInstruction::CondJump {
                    condition,
                    target: on_true,
                });
                self.emit(HirInstruction::Jump(on_false));
            }
        }
    }

    fn is_lowerable(&self, exp: &Expression) -> bool {
        !exp.is_error() && exp.ty.is_defined() && self.registry.is_builtin(exp.ty)
    }

    /// Lowers `exp` into instructions and returns the register holding its value, or
    /// [VirtualRegister::INVALID] for malformed input.
    pub fn lower_expression(&mut self, exp: Expression) -> VirtualRegister {
        if !self.is_lowerable(&exp) {
            tracing::warn!(
                location = %exp.location,
                ty = self.registry.name_of(exp.ty),
                "cannot lower malformed expression"
            );
            return VirtualRegister::INVALID;
        }

        match exp.kind {
            ExpressionKind::Integer(i) => self.assign(HirFactor::Integer(i)),
            ExpressionKind::Boolean(b) => self.assign(HirFactor::Boolean(b)),
            ExpressionKind::Identifier(variable) => {
                let dst = self.new_register();
                self.emit(HirInstruction::Load { dst, variable });
                dst
            }
            ExpressionKind::Binary {
                op: Operator::Not,
                lhs,
                ..
            } => {
                let operand = self.lower_factor(*lhs);
                let dst = self.new_register();
                self.emit(HirInstruction::UnaryOp {
                    dst,
                    op: Operator::Not,
                    operand,
                });
                dst
            }
            ExpressionKind::Binary { op, lhs, rhs } if op.is_associative() => {
                let chain = Expression {
                    kind: ExpressionKind::Binary { op, lhs, rhs },
                    ..exp
                };
                let operands = flatten(op, chain);
                let before = operands.len();
                let operands = fold(op, operands);
                tracing::debug!(%op, before, after = operands.len(), "folded operands");
                self.lower_chain(op, operands)
            }
            ExpressionKind::Binary { op, lhs, rhs } => {
                let lhs = self.lower_factor(*lhs);
                let rhs = self.lower_factor(*rhs);
                let dst = self.new_register();
                self.emit(HirInstruction::BinaryOp { dst, lhs, op, rhs });
                dst
            }
            ExpressionKind::Error => VirtualRegister::INVALID,
        }
    }

    fn assign(&mut self, value: HirFactor) -> VirtualRegister {
        let dst = self.new_register();
        self.emit(HirInstruction::Assign { dst, value });
        dst
    }

    /// Literals stay constant operands, everything else goes through a register.
    fn lower_factor(&mut self, exp: Expression) -> HirFactor {
        match exp.kind {
            ExpressionKind::Integer(i) => HirFactor::Integer(i),
            ExpressionKind::Boolean(b) => HirFactor::Boolean(b),
            _ => HirFactor::Register(self.lower_expression(exp)),
        }
    }

    fn lower_chain(&mut self, op: Operator, operands: Vec<Expression>) -> VirtualRegister {
        let mut operands = operands.into_iter();
        let Some(first) = operands.next() else {
            return VirtualRegister::INVALID;
        };

        let mut acc = self.lower_expression(first);
        for operand in operands {
            let rhs = self.lower_factor(operand);
            let dst = self.new_register();
            self.emit(HirInstruction::BinaryOp {
                dst,
                lhs: HirFactor::Register(acc),
                op,
                rhs,
            });
            acc = dst;
        }
        acc
    }
}
