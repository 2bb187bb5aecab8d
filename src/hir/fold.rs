use crate::ast::{Expression, ExpressionKind, Operator};
use crate::location::SourceLocation;
use crate::types::TypeId;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Constant {
    Int(i32),
    Bool(bool),
}

impl Constant {
    fn of(exp: &Expression) -> Option<Self> {
        match exp.kind {
            ExpressionKind::Integer(i) => Some(Self::Int(i)),
            ExpressionKind::Boolean(b) => Some(Self::Bool(b)),
            _ => None,
        }
    }

    fn into_expression(self, location: SourceLocation) -> Expression {
        let (kind, ty) = match self {
            Self::Int(i) => (ExpressionKind::Integer(i), TypeId::INT),
            Self::Bool(b) => (ExpressionKind::Boolean(b), TypeId::BOOL),
        };
        Expression { location, ty, kind }
    }
}

fn combine(op: Operator, lhs: Constant, rhs: Constant) -> Option<Constant> {
    use Constant::{Bool, Int};

    let value = match (op, lhs, rhs) {
        (Operator::Add, Int(a), Int(b)) => Int(a.wrapping_add(b)),
        (Operator::Multiply, Int(a), Int(b)) => Int(a.wrapping_mul(b)),
        (Operator::BitwiseAnd, Int(a), Int(b)) => Int(a & b),
        (Operator::BitwiseOr, Int(a), Int(b)) => Int(a | b),
        (Operator::BitwiseXor, Int(a), Int(b)) => Int(a ^ b),
        (Operator::BitwiseXor, Bool(a), Bool(b)) => Bool(a ^ b),
        (Operator::LogicalAnd, Bool(a), Bool(b)) => Bool(a && b),
        (Operator::LogicalOr, Bool(a), Bool(b)) => Bool(a || b),
        _ => return None,
    };
    Some(value)
}

fn is_identity(op: Operator, value: Constant) -> bool {
    matches!(
        (op, value),
        (Operator::Add, Constant::Int(0))
            | (Operator::Multiply, Constant::Int(1))
            | (Operator::BitwiseAnd, Constant::Int(-1))
            | (Operator::BitwiseOr | Operator::BitwiseXor, Constant::Int(0))
            | (Operator::BitwiseXor | Operator::LogicalOr, Constant::Bool(false))
            | (Operator::LogicalAnd, Constant::Bool(true))
    )
}

fn is_annihilator(op: Operator, value: Constant) -> bool {
    matches!(
        (op, value),
        (Operator::LogicalAnd, Constant::Bool(false)) | (Operator::LogicalOr, Constant::Bool(true))
    )
}

fn flatten_into(op: Operator, exp: Expression, operands: &mut Vec<Expression>) {
    match exp.kind {
        ExpressionKind::Binary { op: inner, lhs, rhs } if inner == op => {
            flatten_into(op, *lhs, operands);
            flatten_into(op, *rhs, operands);
        }
        _ => operands.push(exp),
    }
}

/// Collects every operand reachable from `exp` through a chain of `op`, left to right.
/// Sub-expressions with a different operator stay intact as single operands.
pub fn flatten(op: Operator, exp: Expression) -> Vec<Expression> {
    let mut operands = Vec::new();
    if op.is_associative() {
        flatten_into(op, exp, &mut operands);
    } else {
        operands.push(exp);
    }
    operands
}

/// Combines all literal operands of `op` into one literal placed first, followed by the
/// remaining operands in their original order.
///
/// An annihilating literal (`false` for `&&`, `true` for `||`) replaces the whole list.
/// An identity literal is dropped as long as something else is left.
pub fn fold(op: Operator, operands: Vec<Expression>) -> Vec<Expression> {
    let mut folded: Option<(Constant, SourceLocation)> = None;
    let mut rest = Vec::with_capacity(operands.len());

    for operand in operands {
        let Some(value) = Constant::of(&operand) else {
            rest.push(operand);
            continue;
        };
        folded = match folded {
            None => Some((value, operand.location)),
            Some((acc, location)) => match combine(op, acc, value) {
                Some(acc) => Some((acc, location)),
                None => {
                    rest.push(operand);
                    Some((acc, location))
                }
            },
        };
    }

    let Some((value, location)) = folded else {
        return rest;
    };
    if is_annihilator(op, value) {
        return vec![value.into_expression(location)];
    }
    if is_identity(op, value) && !rest.is_empty() {
        return rest;
    }

    let mut operands = Vec::with_capacity(rest.len() + 1);
    operands.push(value.into_expression(location));
    operands.extend(rest);
    operands
}
