//! Register-based intermediate representation lowered from the type-checked AST.
//!
//! Every operand of an instruction is a [HirFactor], which is never nested. Structured
//! control flow is reduced to [Label]s and jumps.

mod display;
mod fold;
mod generator;

use crate::ast::{Identifier, Operator, Program};
use crate::types::TypeRegistry;

pub use fold::{flatten, fold};
pub use generator::HirGenerator;

/// Variable slot receiving the value of `return`.
pub const RETURN_SLOT: &str = "$ret";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct VirtualRegister(u32);

impl VirtualRegister {
    /// Result of lowering a malformed expression.
    pub const INVALID: Self = Self(u32::MAX);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Label(u32);

impl Label {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HirFactor {
    Register(VirtualRegister),
    Integer(i32),
    Boolean(bool),
    Variable(Identifier),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HirInstruction {
    Assign {
        dst: VirtualRegister,
        value: HirFactor,
    },
    UnaryOp {
        dst: VirtualRegister,
        op: Operator,
        operand: HirFactor,
    },
    BinaryOp {
        dst: VirtualRegister,
        lhs: HirFactor,
        op: Operator,
        rhs: HirFactor,
    },
    Load {
        dst: VirtualRegister,
        variable: Identifier,
    },
    Store {
        variable: Identifier,
        src: VirtualRegister,
    },
    Jump(Label),
    /// Jumps when `condition` holds `true`, falls through otherwise.
    CondJump {
        condition: VirtualRegister,
        target: Label,
    },
    Label(Label),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HirProgram {
    pub instructions: Vec<HirInstruction>,
    /// Target of every `return`, marked by the last instruction
    pub exit_label: Label,
}

impl HirProgram {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Lowers a whole type-checked program. Consumes the tree: operands are moved into
/// the flattened operand lists instead of being copied.
pub fn lower(program: Program, registry: &TypeRegistry) -> HirProgram {
    HirGenerator::new(registry).lower_program(program)
}
