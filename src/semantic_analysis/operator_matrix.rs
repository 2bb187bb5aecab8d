use crate::ast::Operator;
use crate::types::TypeId;
use std::collections::HashMap;

const INT: TypeId = TypeId::INT;
const BOOL: TypeId = TypeId::BOOL;

/// `(lhs, operator, rhs) -> result`. Unary operators use the operand on both sides.
const ENTRIES: [(TypeId, Operator, TypeId, TypeId); 22] = [
    (INT, Operator::Add, INT, INT),
    (INT, Operator::Subtract, INT, INT),
    (INT, Operator::Multiply, INT, INT),
    (INT, Operator::Div, INT, INT),
    (INT, Operator::Mod, INT, INT),
    (INT, Operator::ShiftLeft, INT, INT),
    (INT, Operator::ShiftRight, INT, INT),
    (INT, Operator::BitwiseAnd, INT, INT),
    (INT, Operator::BitwiseXor, INT, INT),
    (INT, Operator::BitwiseOr, INT, INT),
    (INT, Operator::LessThan, INT, BOOL),
    (INT, Operator::GreaterThan, INT, BOOL),
    (INT, Operator::LessOrEqual, INT, BOOL),
    (INT, Operator::GreaterOrEqual, INT, BOOL),
    (INT, Operator::IsEqual, INT, BOOL),
    (INT, Operator::IsNotEqual, INT, BOOL),
    (BOOL, Operator::LogicalAnd, BOOL, BOOL),
    (BOOL, Operator::LogicalOr, BOOL, BOOL),
    (BOOL, Operator::BitwiseXor, BOOL, BOOL),
    (BOOL, Operator::IsEqual, BOOL, BOOL),
    (BOOL, Operator::IsNotEqual, BOOL, BOOL),
    (BOOL, Operator::Not, BOOL, BOOL),
];

/// Single source of truth for which operator applies to which operand types.
#[derive(Debug, Clone)]
pub struct OperatorMatrix {
    entries: HashMap<(TypeId, Operator, TypeId), TypeId>,
}

impl OperatorMatrix {
    pub fn new() -> Self {
        let entries = ENTRIES
            .iter()
            .map(|&(lhs, op, rhs, result)| ((lhs, op, rhs), result))
            .collect();
        Self { entries }
    }

    /// Returns [TypeId::UNDEFINED] when the combination is not in the table.
    pub fn lookup(&self, lhs: TypeId, op: Operator, rhs: TypeId) -> TypeId {
        self.entries
            .get(&(lhs, op, rhs))
            .copied()
            .unwrap_or(TypeId::UNDEFINED)
    }

    pub fn lookup_unary(&self, op: Operator, operand: TypeId) -> TypeId {
        self.lookup(operand, op, operand)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OperatorMatrix {
    fn default() -> Self {
        Self::new()
    }
}
