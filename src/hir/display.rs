use super::{HirFactor, HirInstruction, HirProgram, Label, VirtualRegister};
use std::fmt;

impl fmt::Display for VirtualRegister {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_valid() {
            write!(f, "%{}", self.0)
        } else {
            write!(f, "%?")
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for HirFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Register(register) => write!(f, "{register}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Variable(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for HirInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Assign { dst, value } => write!(f, "{dst} = {value}"),
            Self::UnaryOp { dst, op, operand } => write!(f, "{dst} = {op} {operand}"),
            Self::BinaryOp { dst, lhs, op, rhs } => write!(f, "{dst} = {lhs} {op} {rhs}"),
            Self::Load { dst, variable } => write!(f, "{dst} = load {variable}"),
            Self::Store { variable, src } => write!(f, "store {src} to {variable}"),
            Self::Jump(label) => write!(f, "goto {label}"),
            Self::CondJump { condition, target } => write!(f, "if {condition} goto {target}"),
            Self::Label(label) => write!(f, "{label}:"),
        }
    }
}

impl fmt::Display for HirProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for instruction in &self.instructions {
            match instruction {
                HirInstruction::Label(_) => writeln!(f, "{instruction}")?,
                _ => writeln!(f, "    {instruction}")?,
            }
        }
        Ok(())
    }
}
